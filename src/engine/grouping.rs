//! Bucketing of processed records by a closed set of key strategies.

use crate::record::ProcessedRecord;
use indexmap::IndexMap;
use std::fmt;

/// Which field(s) a bucket is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    Vehicle,
    ModelBrand,
    Group,
    Month,
    GroupMonth,
}

/// Identity of a bucket. Equal keys merge; comparison is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BucketKey {
    Vehicle(String),
    ModelBrand { model: String, brand: String },
    Group(String),
    Month(String),
    GroupMonth { group: String, month: String },
}

impl GroupBy {
    pub fn key_of(self, record: &ProcessedRecord) -> BucketKey {
        match self {
            GroupBy::Vehicle => BucketKey::Vehicle(record.vehicle().to_string()),
            GroupBy::ModelBrand => BucketKey::ModelBrand {
                model: record.model().to_string(),
                brand: record.brand().to_string(),
            },
            GroupBy::Group => BucketKey::Group(record.group().to_string()),
            GroupBy::Month => BucketKey::Month(record.month().to_string()),
            GroupBy::GroupMonth => BucketKey::GroupMonth {
                group: record.group().to_string(),
                month: record.month().to_string(),
            },
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Vehicle(v) | BucketKey::Group(v) | BucketKey::Month(v) => f.write_str(v),
            BucketKey::ModelBrand { model, brand } if brand.is_empty() => f.write_str(model),
            BucketKey::ModelBrand { model, brand } => write!(f, "{model} ({brand})"),
            BucketKey::GroupMonth { group, month } => write!(f, "{group} {month}"),
        }
    }
}

/// Buckets in first-seen key order; records keep input order inside each bucket.
pub type Buckets<'a> = IndexMap<BucketKey, Vec<&'a ProcessedRecord>>;

pub fn bucket<'a, I>(records: I, by: GroupBy) -> Buckets<'a>
where
    I: IntoIterator<Item = &'a ProcessedRecord>,
{
    let mut buckets = Buckets::new();
    for record in records {
        buckets.entry(by.key_of(record)).or_default().push(record);
    }
    buckets
}
