use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Wire value of `parent_id` for a transaction without a parent.
pub const NO_PARENT: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: String,
    #[serde(
        default,
        serialize_with = "serialize_parent",
        deserialize_with = "deserialize_parent"
    )]
    pub parent_id: Option<i64>,
    #[serde(rename = "transactionId")]
    pub transaction_id: i64,
}

impl Transaction {
    pub fn new(
        transaction_id: i64,
        amount: f64,
        tx_type: impl Into<String>,
        parent_id: Option<i64>,
    ) -> Self {
        Self {
            amount,
            tx_type: tx_type.into(),
            parent_id,
            transaction_id,
        }
    }

    /// The effective parent: the sentinel and a self-reference both mean "root".
    pub fn parent(&self) -> Option<i64> {
        self.parent_id
            .filter(|&parent| parent != NO_PARENT && parent != self.transaction_id)
    }
}

/// Body of a create/replace request. The id travels in the URL path.
#[derive(Debug, Deserialize, PartialEq)]
pub struct TransactionBody {
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: String,
    #[serde(default, deserialize_with = "deserialize_parent")]
    pub parent_id: Option<i64>,
}

impl TransactionBody {
    pub fn into_transaction(self, transaction_id: i64) -> Transaction {
        Transaction {
            amount: self.amount,
            tx_type: self.tx_type,
            parent_id: self.parent_id,
            transaction_id,
        }
    }
}

/// One record of a bulk import file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct TransactionRow {
    pub transaction_id: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: String,
    #[serde(deserialize_with = "deserialize_parent")]
    pub parent_id: Option<i64>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            amount: row.amount,
            tx_type: row.tx_type,
            parent_id: row.parent_id,
            transaction_id: row.transaction_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SumResponse {
    pub sum: f64,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Amounts must be finite; a CSV cell may otherwise spell `NaN` or `inf`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = f64::deserialize(deserializer)?;
    if !amount.is_finite() {
        return Err(D::Error::custom(format!("amount must be finite, got {}", amount)));
    }
    Ok(amount)
}

fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer)
        .map(|opt_parent| opt_parent.filter(|&parent| parent != NO_PARENT))
}

fn serialize_parent<S>(parent_id: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(parent_id.unwrap_or(NO_PARENT))
}
