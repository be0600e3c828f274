//! Class intake and delivery-mode vocabularies.

use serde::{Deserialize, Serialize};

/// Intake period within a trimester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakePeriod {
    #[serde(rename = "HT1")]
    Ht1,
    #[serde(rename = "HT2")]
    Ht2,
    #[serde(rename = "FT")]
    Ft,
}

impl IntakePeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ht1 => "HT1",
            Self::Ht2 => "HT2",
            Self::Ft => "FT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "HT1" => Some(Self::Ht1),
            "HT2" => Some(Self::Ht2),
            "FT" => Some(Self::Ft),
            _ => None,
        }
    }
}

/// Delivery mode of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassMode {
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "in-person")]
    InPerson,
    #[serde(rename = "hybrid")]
    Hybrid,
}

impl ClassMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::InPerson => "in-person",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "online" => Some(Self::Online),
            "in-person" => Some(Self::InPerson),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}
