// Ticket ledger value types.
//
// A ledger is split into an immutable input record (what the booking clerk
// types) and a derived record (what the calculator produces). Derived figures
// are never entered by hand and never patched in place; they are recomputed
// from scratch whenever any input changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Itemized tax codes printed on an air ticket.
///
/// The codes follow the fare breakdown the GDS emits for Bangladesh
/// departures; `Other` collects anything outside the fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxCode {
    /// Embarkation fee
    Bd,
    /// VAT on embarkation fee
    Ut,
    /// Excise duty
    E5,
    /// Service tax
    E3,
    /// Supplementary service tax
    G4,
    /// Arrival/departure fee
    Ow,
    /// Passenger processing charge
    P7,
    /// Passenger service charge
    P8,
    /// Travel tax
    Tt,
    /// Fuel surcharge
    Yq,
    /// Free-form other taxes
    Other,
}

impl TaxCode {
    pub const ALL: [TaxCode; 11] = [
        TaxCode::Bd,
        TaxCode::Ut,
        TaxCode::E5,
        TaxCode::E3,
        TaxCode::G4,
        TaxCode::Ow,
        TaxCode::P7,
        TaxCode::P8,
        TaxCode::Tt,
        TaxCode::Yq,
        TaxCode::Other,
    ];
}

impl fmt::Display for TaxCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            TaxCode::Bd => "BD",
            TaxCode::Ut => "UT",
            TaxCode::E5 => "E5",
            TaxCode::E3 => "E3",
            TaxCode::G4 => "G4",
            TaxCode::Ow => "OW",
            TaxCode::P7 => "P7",
            TaxCode::P8 => "P8",
            TaxCode::Tt => "TT",
            TaxCode::Yq => "YQ",
            TaxCode::Other => "OTHER",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for TaxCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BD" => Ok(TaxCode::Bd),
            "UT" => Ok(TaxCode::Ut),
            "E5" => Ok(TaxCode::E5),
            "E3" => Ok(TaxCode::E3),
            "G4" => Ok(TaxCode::G4),
            "OW" => Ok(TaxCode::Ow),
            "P7" => Ok(TaxCode::P7),
            "P8" => Ok(TaxCode::P8),
            "TT" => Ok(TaxCode::Tt),
            "YQ" => Ok(TaxCode::Yq),
            "OTHER" => Ok(TaxCode::Other),
            other => Err(format!("Unknown tax code: {}", other)),
        }
    }
}

/// One amount per itemized tax code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TaxBreakdown {
    #[sqlx(rename = "tax_bd")]
    pub bd: Decimal,
    #[sqlx(rename = "tax_ut")]
    pub ut: Decimal,
    #[sqlx(rename = "tax_e5")]
    pub e5: Decimal,
    #[sqlx(rename = "tax_e3")]
    pub e3: Decimal,
    #[sqlx(rename = "tax_g4")]
    pub g4: Decimal,
    #[sqlx(rename = "tax_ow")]
    pub ow: Decimal,
    #[sqlx(rename = "tax_p7")]
    pub p7: Decimal,
    #[sqlx(rename = "tax_p8")]
    pub p8: Decimal,
    #[sqlx(rename = "tax_tt")]
    pub tt: Decimal,
    #[sqlx(rename = "tax_yq")]
    pub yq: Decimal,
    #[sqlx(rename = "tax_other")]
    pub other: Decimal,
}

impl TaxBreakdown {
    /// Amount booked under a single code
    pub fn amount(&self, code: TaxCode) -> Decimal {
        match code {
            TaxCode::Bd => self.bd,
            TaxCode::Ut => self.ut,
            TaxCode::E5 => self.e5,
            TaxCode::E3 => self.e3,
            TaxCode::G4 => self.g4,
            TaxCode::Ow => self.ow,
            TaxCode::P7 => self.p7,
            TaxCode::P8 => self.p8,
            TaxCode::Tt => self.tt,
            TaxCode::Yq => self.yq,
            TaxCode::Other => self.other,
        }
    }

    /// Sum over every itemized code
    pub fn total(&self) -> Decimal {
        TaxCode::ALL.iter().map(|code| self.amount(*code)).sum()
    }
}

/// Everything the booking clerk enters for one ticket's money side.
///
/// All fields default to zero; the calculator accepts any combination
/// without erroring so the form can be recomputed mid-entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LedgerInputs {
    /// Vendor's quoted fare before taxes
    pub base_fare: Decimal,

    /// Itemized taxes as printed on the ticket
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub taxes: TaxBreakdown,

    /// Agency commission as a percentage of the base fare (0-100)
    pub commission_rate_pct: Decimal,

    /// Performance-linked bonus granted by the vendor
    pub plb: Decimal,

    /// Surcharge that sits inside the withholding-tax base
    pub service_charge_taxable: Decimal,

    /// Surcharge outside the withholding-tax base
    pub service_charge_extra: Decimal,

    /// Amount already remitted to the vendor
    pub vendor_paid: Decimal,

    /// Price agreed with the customer
    pub customer_deal: Decimal,

    /// Amount collected from the customer so far
    pub customer_paid: Decimal,
}

/// Figures the calculator derives from a `LedgerInputs`.
///
/// Produced fresh on every recompute; all fields non-negative except
/// `profit`, which is signed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LedgerDerived {
    pub total_taxes: Decimal,
    pub advance_tax: Decimal,
    pub vendor_amount: Decimal,
    pub vendor_due: Decimal,
    pub customer_due: Decimal,
    pub profit: Decimal,
}

/// Regulatory constants the calculator applies.
///
/// The withholding rate and the exempt code set track NBR circulars and do
/// change; they are loaded from configuration rather than written into the
/// formula.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRules {
    /// Advance income tax rate applied to the non-exempt transaction base
    pub advance_tax_rate: Decimal,
    /// Tax codes excluded from the withholding base
    pub advance_tax_exempt: Vec<TaxCode>,
}

impl Default for LedgerRules {
    fn default() -> Self {
        Self {
            // 0.30% AIT on ticket transactions
            advance_tax_rate: Decimal::new(3, 3),
            advance_tax_exempt: vec![TaxCode::Bd, TaxCode::Ut, TaxCode::E5],
        }
    }
}

/// Raw ledger fields exactly as the booking form posts them.
///
/// Every numeric arrives as an optional string because the clerk may still
/// be mid-entry; conversion to `LedgerInputs` is parse-or-zero and never
/// fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerForm {
    #[serde(default, deserialize_with = "raw_amount")]
    pub base_fare: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub bd: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub ut: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub e5: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub e3: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub g4: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub ow: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub p7: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub p8: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub tt: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub yq: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub other_taxes: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub commission_rate_pct: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub plb: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub service_charge_taxable: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub service_charge_extra: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub vendor_paid: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub customer_deal: Option<String>,
    #[serde(default, deserialize_with = "raw_amount")]
    pub customer_paid: Option<String>,
}

/// Accepts a ledger field posted as a string, a bare JSON number or null.
///
/// The booking screens post text-field state, but older clients send
/// numbers; both routes end in the same parse-or-zero coercion.
fn raw_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

impl LedgerForm {
    /// Coerce the raw form into typed inputs.
    ///
    /// Blank, missing and non-numeric fields become zero; negative entries
    /// clamp to zero; the commission rate clamps into 0-100.
    pub fn to_inputs(&self) -> LedgerInputs {
        let rate = dec_or_zero(&self.commission_rate_pct);

        LedgerInputs {
            base_fare: dec_or_zero(&self.base_fare),
            taxes: TaxBreakdown {
                bd: dec_or_zero(&self.bd),
                ut: dec_or_zero(&self.ut),
                e5: dec_or_zero(&self.e5),
                e3: dec_or_zero(&self.e3),
                g4: dec_or_zero(&self.g4),
                ow: dec_or_zero(&self.ow),
                p7: dec_or_zero(&self.p7),
                p8: dec_or_zero(&self.p8),
                tt: dec_or_zero(&self.tt),
                yq: dec_or_zero(&self.yq),
                other: dec_or_zero(&self.other_taxes),
            },
            commission_rate_pct: rate.min(Decimal::ONE_HUNDRED),
            plb: dec_or_zero(&self.plb),
            service_charge_taxable: dec_or_zero(&self.service_charge_taxable),
            service_charge_extra: dec_or_zero(&self.service_charge_extra),
            vendor_paid: dec_or_zero(&self.vendor_paid),
            customer_deal: dec_or_zero(&self.customer_deal),
            customer_paid: dec_or_zero(&self.customer_paid),
        }
    }
}

/// Parse-or-zero for a raw form field, clamped at zero
fn dec_or_zero(raw: &Option<String>) -> Decimal {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Decimal::from_str(s).ok())
        .map(|d| d.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}
