use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 文档字段值（文档库的原生标量类型）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    StringValue(String),
    IntegerValue(i64),
    DoubleValue(f64),
    TimestampValue(DateTime<Utc>),
}

/// 一条文档记录：文档 ID + 扁平字段表。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub document_id: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl DocumentRecord {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: &str, value: FieldValue) {
        self.fields.insert(key.to_string(), value);
    }

    /// 仅在有值时写入字段。
    pub fn set_opt_str(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.set(key, FieldValue::StringValue(value.to_string()));
        }
    }

    pub fn set_opt_timestamp(&mut self, key: &str, value: Option<DateTime<Utc>>) {
        if let Some(value) = value {
            self.set(key, FieldValue::TimestampValue(value));
        }
    }

    /// 字符串字段；类型不符视为缺失。
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::StringValue(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.fields.get(key) {
            Some(FieldValue::IntegerValue(value)) => Some(*value),
            _ => None,
        }
    }

    /// 数值字段，整数与浮点均可。
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.fields.get(key) {
            Some(FieldValue::DoubleValue(value)) => Some(*value),
            Some(FieldValue::IntegerValue(value)) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn get_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.fields.get(key) {
            Some(FieldValue::TimestampValue(value)) => Some(*value),
            _ => None,
        }
    }
}
