use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::lenient;
use super::Record;
use crate::store::Collection;

/// Approval state of a gym listing.
///
/// Only a literal `"Pending"` puts a gym in the approval queue. A missing,
/// null or unrecognised value decodes as `Unknown` and is never written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    #[serde(rename = "Not-Approved")]
    NotApproved,
    #[default]
    #[serde(skip)]
    Unknown,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::NotApproved => "Not-Approved",
            ApprovalStatus::Unknown => "Not Available",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "Pending" => ApprovalStatus::Pending,
            "Approved" => ApprovalStatus::Approved,
            "Not-Approved" => ApprovalStatus::NotApproved,
            _ => ApprovalStatus::Unknown,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ApprovalStatus::Unknown)
    }
}

fn deserialize_approval<'de, D>(deserializer: D) -> Result<ApprovalStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(status) => ApprovalStatus::from_wire(status.trim()),
        _ => ApprovalStatus::Unknown,
    })
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service level assigned when a gym is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GymTier {
    Basic,
    Silver,
    Diamond,
}

impl GymTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            GymTier::Basic => "Basic",
            GymTier::Silver => "Silver",
            GymTier::Diamond => "Diamond",
        }
    }
}

impl fmt::Display for GymTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GymTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(GymTier::Basic),
            "silver" => Ok(GymTier::Silver),
            "diamond" => Ok(GymTier::Diamond),
            other => Err(format!("Unknown gym tier: {}", other)),
        }
    }
}

/// The registration flow writes `Not_Decided` until a tier is chosen.
fn deserialize_tier<'de, D>(deserializer: D) -> Result<Option<GymTier>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("Not_Decided") => Ok(None),
        Some(tier) => tier.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "isSelected", default)]
    pub is_selected: bool,
}

/// Payout status of a transaction. Anything other than `Paid` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Paid,
    Pending,
    Other(String),
}

impl TransactionStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, TransactionStatus::Paid)
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Paid" => TransactionStatus::Paid,
            "Pending" => TransactionStatus::Pending,
            _ => TransactionStatus::Other(value),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Paid => "Paid".to_string(),
            TransactionStatus::Pending => "Pending".to_string(),
            TransactionStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Paid => f.write_str("Paid"),
            TransactionStatus::Pending => f.write_str("Pending"),
            TransactionStatus::Other(value) => f.write_str(value),
        }
    }
}

/// Withdrawal request embedded in a gym document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient::string")]
    pub requested_date: String,
    #[serde(rename = "transactionMethod", default, deserialize_with = "lenient::string")]
    pub method: String,
    #[serde(rename = "transactionStatus", default)]
    pub status: TransactionStatus,
    #[serde(rename = "widthDrawAmount", default, deserialize_with = "lenient::opt_f64")]
    pub withdrawal_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gym {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "gym_name", default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub contact_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub amenities: Vec<Amenity>,
    #[serde(rename = "license", default, deserialize_with = "lenient::opt_string")]
    pub license_image: Option<String>,
    #[serde(
        rename = "isApproved",
        default,
        deserialize_with = "deserialize_approval",
        skip_serializing_if = "ApprovalStatus::is_unknown"
    )]
    pub approval_status: ApprovalStatus,
    /// Tier granted by an administrator.
    #[serde(rename = "gym_type", default, deserialize_with = "deserialize_tier")]
    pub tier: Option<GymTier>,
    /// Tier the owner asked for at registration.
    #[serde(rename = "gymType", default, deserialize_with = "deserialize_tier")]
    pub requested_tier: Option<GymTier>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub ratings: Option<f64>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub opening_hours: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub transactions: Vec<Transaction>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub visitors: Vec<Value>,
}

impl Gym {
    pub fn selected_amenities(&self) -> impl Iterator<Item = &Amenity> {
        self.amenities.iter().filter(|amenity| amenity.is_selected)
    }

    pub fn visitor_count(&self) -> usize {
        self.visitors.len()
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Record for Gym {
    const COLLECTION: Collection = Collection::Gyms;

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
