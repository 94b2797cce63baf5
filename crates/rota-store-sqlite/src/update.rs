//! A deterministic builder for partial-update SET clauses.
//!
//! Fields are emitted in the order they are pushed, which callers keep equal
//! to struct declaration order, so the assembled SQL is stable and testable.

use rusqlite::types::Value;

/// An accumulating `SET` clause over a typed field-set.
#[derive(Debug, Default)]
pub struct SetClause {
  columns: Vec<&'static str>,
  params:  Vec<Value>,
}

impl SetClause {
  pub fn new() -> Self { Self::default() }

  /// Add a column assignment. Push order is emission order.
  pub fn set(&mut self, column: &'static str, value: impl Into<Value>) -> &mut Self {
    self.columns.push(column);
    self.params.push(value.into());
    self
  }

  /// Add a column assignment only when the patch carries the field.
  pub fn set_opt<V: Into<Value>>(
    &mut self,
    column: &'static str,
    value: Option<V>,
  ) -> &mut Self {
    if let Some(v) = value {
      self.set(column, v);
    }
    self
  }

  pub fn is_empty(&self) -> bool { self.columns.is_empty() }

  /// Assemble `UPDATE <table> SET c1 = ?1, ... WHERE id = ?n`.
  pub fn update_sql(&self, table: &str) -> String {
    let assignments = self
      .columns
      .iter()
      .enumerate()
      .map(|(i, column)| format!("{column} = ?{}", i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    format!(
      "UPDATE {table} SET {assignments} WHERE id = ?{}",
      self.columns.len() + 1
    )
  }

  /// The positional parameters for [`Self::update_sql`], key last.
  pub fn into_params(mut self, id: i64) -> Vec<Value> {
    self.params.push(Value::Integer(id));
    self.params
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn emits_fields_in_push_order() {
    let mut clause = SetClause::new();
    clause.set("date", "2025-01-10".to_string());
    clause.set("duty_team_id", 3i64);
    assert_eq!(
      clause.update_sql("duty_schedule"),
      "UPDATE duty_schedule SET date = ?1, duty_team_id = ?2 WHERE id = ?3"
    );

    let params = clause.into_params(42);
    assert_eq!(params.len(), 3);
    assert_eq!(params[2], Value::Integer(42));
  }

  #[test]
  fn skips_absent_optional_fields() {
    let mut clause = SetClause::new();
    clause.set_opt("date", None::<String>);
    clause.set_opt("actual_personnel_id", Some(7i64));
    assert_eq!(
      clause.update_sql("duty_schedule"),
      "UPDATE duty_schedule SET actual_personnel_id = ?1 WHERE id = ?2"
    );
  }

  #[test]
  fn empty_clause_is_detectable() {
    let mut clause = SetClause::new();
    assert!(clause.is_empty());
    clause.set_opt("date", None::<String>);
    assert!(clause.is_empty());
  }
}
