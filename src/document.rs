//! Typed records from the documents the remote store hands back.
//!
//! The store keeps bills, incomes and expenses as loosely typed JSON-like documents.
//! Every document is checked against its schema once, here, so that nothing past this
//! module has to second guess whether a field is present or has the right type.

use crate::{
    bill::Bill,
    summary::{Expense, Income},
    CURRENCY_PRECISION,
};
use log::warn;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DocumentError {
    #[error("document '{0}' does not match the schema: {1}")]
    Schema(String, String), // document id, reason
    #[error("document '{0}' has an amount that can't be represented: {1}")]
    InvalidAmount(String, f64), // document id, amount
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BillDocument {
    name: String,
    account_number: String,
    amount: f64,
    day: u32,
    month: String,
    year: i32,
    payment_link: String,
    bill_repeats: String,
    notification: bool,
}

#[derive(Deserialize)]
struct IncomeDocument {
    name: String,
    amount: f64,
    month: String,
    year: i32,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct ExpenseDocument {
    name: String,
    amount: f64,
    month: String,
    year: i32,
    category: String,
}

/// Map a stored bill document to a `Bill`.
///
/// The store's document id is authoritative; an `id` field inside the body is ignored.
pub fn bill_from_document(id: &str, document: &Value) -> Result<Bill, DocumentError> {
    let doc = BillDocument::deserialize(document)
        .map_err(|e| DocumentError::Schema(id.to_owned(), e.to_string()))?;

    Ok(Bill {
        id: id.to_owned(),
        name: doc.name,
        account_number: doc.account_number,
        amount: to_currency(id, doc.amount)?,
        day: doc.day,
        month: doc.month,
        year: doc.year,
        payment_link: doc.payment_link,
        repeats: doc.bill_repeats,
        notification: doc.notification,
    })
}

pub fn income_from_document(id: &str, document: &Value) -> Result<Income, DocumentError> {
    let doc = IncomeDocument::deserialize(document)
        .map_err(|e| DocumentError::Schema(id.to_owned(), e.to_string()))?;

    Ok(Income {
        id: id.to_owned(),
        name: doc.name,
        amount: to_currency(id, doc.amount)?,
        month: doc.month,
        year: doc.year,
        kind: doc.kind,
    })
}

pub fn expense_from_document(id: &str, document: &Value) -> Result<Expense, DocumentError> {
    let doc = ExpenseDocument::deserialize(document)
        .map_err(|e| DocumentError::Schema(id.to_owned(), e.to_string()))?;

    Ok(Expense {
        id: id.to_owned(),
        name: doc.name,
        amount: to_currency(id, doc.amount)?,
        month: doc.month,
        year: doc.year,
        category: doc.category,
    })
}

/// Map a batch of `(id, document)` pairs, dropping any that don't match the schema.
///
/// One bad document never prevents the rest of the batch from loading. Each dropped
/// document is logged at `warn`.
pub fn bills_from_documents<'a, I>(documents: I) -> Vec<Bill>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    collect_valid(documents, bill_from_document)
}

pub fn incomes_from_documents<'a, I>(documents: I) -> Vec<Income>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    collect_valid(documents, income_from_document)
}

pub fn expenses_from_documents<'a, I>(documents: I) -> Vec<Expense>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    collect_valid(documents, expense_from_document)
}

fn collect_valid<'a, I, T, F>(documents: I, map: F) -> Vec<T>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
    F: Fn(&str, &Value) -> Result<T, DocumentError>,
{
    documents
        .into_iter()
        .filter_map(|(id, doc)| match map(id, doc) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect()
}

// The store keeps amounts as doubles. Round to currency precision so that 12.34 doesn't
// become 12.339999999999999857891452848.
fn to_currency(id: &str, amount: f64) -> Result<Decimal, DocumentError> {
    Decimal::from_f64_retain(amount)
        .map(|d| d.round_dp(CURRENCY_PRECISION))
        .ok_or_else(|| DocumentError::InvalidAmount(id.to_owned(), amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn bill_doc() -> Value {
        json!({
            "id": "ignored",
            "name": "Electricity",
            "accountNumber": "12-3456",
            "amount": 84.3,
            "day": 14,
            "month": "March",
            "year": 2024,
            "paymentLink": "https://example.com/pay",
            "billRepeats": "Monthly",
            "notification": true
        })
    }

    #[test]
    fn bill_from_document_valid() {
        let bill = bill_from_document("doc-1", &bill_doc()).unwrap();

        assert_eq!(bill.id, "doc-1");
        assert_eq!(bill.name, "Electricity");
        assert_eq!(bill.account_number, "12-3456");
        assert_eq!(bill.amount, dec!(84.30));
        assert_eq!(bill.day, 14);
        assert_eq!(bill.month, "March");
        assert_eq!(bill.year, 2024);
        assert_eq!(bill.payment_link, "https://example.com/pay");
        assert_eq!(bill.repeats, "Monthly");
        assert!(bill.notification);
    }

    #[test]
    fn bill_from_document_integer_amount() {
        let mut doc = bill_doc();
        doc["amount"] = json!(950);
        assert_eq!(bill_from_document("doc-1", &doc).unwrap().amount, dec!(950));
    }

    #[test]
    fn bill_from_document_rounds_amount() {
        let mut doc = bill_doc();
        doc["amount"] = json!(12.34);
        assert_eq!(bill_from_document("doc-1", &doc).unwrap().amount, dec!(12.34));
    }

    #[test]
    fn bill_from_document_missing_field() {
        let mut doc = bill_doc();
        doc.as_object_mut().unwrap().remove("paymentLink");

        match bill_from_document("doc-1", &doc) {
            Err(DocumentError::Schema(id, reason)) => {
                assert_eq!(id, "doc-1");
                assert!(reason.contains("paymentLink"));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn bill_from_document_wrong_type() {
        let mut doc = bill_doc();
        doc["day"] = json!("14");
        assert!(matches!(
            bill_from_document("doc-1", &doc),
            Err(DocumentError::Schema(_, _))
        ));

        let mut doc = bill_doc();
        doc["day"] = json!(-1);
        assert!(matches!(
            bill_from_document("doc-1", &doc),
            Err(DocumentError::Schema(_, _))
        ));
    }

    #[test]
    fn bills_from_documents_skips_invalid() {
        let _ = env_logger::builder().is_test(true).try_init();
        let good = bill_doc();
        let bad = json!({ "name": "Half a bill" });
        let mut other = bill_doc();
        other["name"] = json!("Water");

        let docs = vec![("a", &good), ("b", &bad), ("c", &other)];
        let bills = bills_from_documents(docs);
        let ids: Vec<&str> = bills.iter().map(|b| b.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn income_from_document_valid() {
        let doc = json!({
            "name": "Pay",
            "amount": 2100.5,
            "month": "March",
            "year": 2024,
            "type": "Salary"
        });
        let income = income_from_document("i-1", &doc).unwrap();

        assert_eq!(income.id, "i-1");
        assert_eq!(income.amount, dec!(2100.50));
        assert_eq!(income.kind, "Salary");
    }

    #[test]
    fn expense_documents_batch() {
        let lunch = json!({
            "name": "Lunch",
            "amount": 8.15,
            "month": "March",
            "year": 2024,
            "category": "Food"
        });
        let broken = json!({
            "name": "Lunch",
            "amount": 8.15,
            "month": "March",
            "year": 2024
        });

        let expenses = expenses_from_documents(vec![("e-1", &lunch), ("e-2", &broken)]);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[0].amount, dec!(8.15));

        assert!(incomes_from_documents(vec![("e-1", &lunch)]).is_empty());
    }
}
