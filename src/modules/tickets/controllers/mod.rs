pub mod ticket_controller;
