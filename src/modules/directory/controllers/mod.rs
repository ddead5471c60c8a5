pub mod directory_controller;
