use crate::error::{StoreError, StoreResult};
use crate::value::{Value, ValueType};

/// A value bound to a `:name` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Value,
    pub ty: ValueType,
}

/// SQL text with named `:name` placeholders and the values bound to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Param>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Binds `value` with the type it carries; nulls bind as text.
    pub fn bind(self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = value.value_type();
        self.bind_typed(name, value, ty)
    }

    pub fn bind_typed(mut self, name: &str, value: Value, ty: ValueType) -> Self {
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(param) => {
                param.value = value;
                param.ty = ty;
            }
            None => self.params.push(Param {
                name: name.to_string(),
                value,
                ty,
            }),
        }
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    // -------- Builders --------

    pub fn select_all(table: &str) -> Self {
        Self::new(format!("SELECT * FROM {table}"))
    }

    pub fn select_by_key(table: &str, key: &str) -> Self {
        Self::new(format!("SELECT * FROM {table} WHERE {key} = :id"))
    }

    pub fn insert(table: &str, columns: &[&str]) -> Self {
        let placeholders: Vec<String> = columns.iter().map(|c| format!(":{c}")).collect();
        Self::new(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        ))
    }

    pub fn update(table: &str, columns: &[&str], key: &str) -> Self {
        let sets: Vec<String> = columns.iter().map(|c| format!("{c} = :{c}")).collect();
        Self::new(format!(
            "UPDATE {} SET {} WHERE {} = :id",
            table,
            sets.join(", "),
            key
        ))
    }

    pub fn delete_by_key(table: &str, key: &str) -> Self {
        Self::new(format!("DELETE FROM {table} WHERE {key} = :id"))
    }

    pub fn delete_by_pair(table: &str, first: &str, second: &str) -> Self {
        Self::new(format!(
            "DELETE FROM {table} WHERE {first} = :{first} AND {second} = :{second}"
        ))
    }

    /// Rewrites named placeholders to `$n`, numbered by first appearance.
    ///
    /// `::` casts and quoted text are left alone. Bound names that never appear
    /// are dropped; a placeholder with no bound value is an error.
    pub fn to_positional(&self) -> StoreResult<(String, Vec<&Param>)> {
        let chars: Vec<char> = self.sql.chars().collect();
        let mut out = String::with_capacity(self.sql.len());
        let mut order: Vec<&Param> = Vec::new();
        let mut quote: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if let Some(q) = quote {
                out.push(c);
                if c == q {
                    quote = None;
                }
                i += 1;
                continue;
            }
            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    out.push(c);
                    i += 1;
                }
                ':' if chars.get(i + 1) == Some(&':') => {
                    out.push_str("::");
                    i += 2;
                }
                ':' if chars.get(i + 1).is_some_and(|n| n.is_alphabetic() || *n == '_') => {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len() && (chars[end].is_alphanumeric() || chars[end] == '_') {
                        end += 1;
                    }
                    let name: String = chars[start..end].iter().collect();
                    let param = self
                        .param(&name)
                        .ok_or_else(|| StoreError::UnboundParameter(name.clone()))?;
                    let position = match order.iter().position(|p| p.name == name) {
                        Some(pos) => pos + 1,
                        None => {
                            order.push(param);
                            order.len()
                        }
                    };
                    out.push('$');
                    out.push_str(&position.to_string());
                    i = end;
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            }
        }

        Ok((out, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_insert_with_named_placeholders() {
        let stmt = Statement::insert("\"USER\"", &["email", "given_name"]);
        assert_eq!(
            stmt.sql(),
            "INSERT INTO \"USER\" (email, given_name) VALUES (:email, :given_name)"
        );
    }

    #[test]
    fn builds_update_and_deletes() {
        assert_eq!(
            Statement::update("JOB", &["other_requirements", "date_posted"], "job_id").sql(),
            "UPDATE JOB SET other_requirements = :other_requirements, date_posted = :date_posted WHERE job_id = :id"
        );
        assert_eq!(
            Statement::delete_by_pair("JOB_APPLICATION", "caregiver_user_id", "job_id").sql(),
            "DELETE FROM JOB_APPLICATION WHERE caregiver_user_id = :caregiver_user_id AND job_id = :job_id"
        );
    }

    #[test]
    fn numbers_placeholders_by_first_appearance() {
        let stmt = Statement::new("SELECT * FROM t WHERE a = :b OR c = :a OR d = :b")
            .bind("a", 1)
            .bind("b", 2);
        let (sql, params) = stmt.to_positional().unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE a = $1 OR c = $2 OR d = $1");
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn leaves_casts_and_quoted_text_alone() {
        let stmt = Statement::new("SELECT ':x', \"a:b\", v::text FROM t WHERE id = :id").bind("id", 7);
        let (sql, params) = stmt.to_positional().unwrap();
        assert_eq!(sql, "SELECT ':x', \"a:b\", v::text FROM t WHERE id = $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn unbound_placeholder_is_an_error() {
        let err = Statement::select_by_key("JOB", "job_id").to_positional().unwrap_err();
        assert!(matches!(err, StoreError::UnboundParameter(name) if name == "id"));
    }

    #[test]
    fn typed_null_keeps_its_type() {
        let stmt = Statement::new("SELECT :n").bind_typed("n", Value::Null, ValueType::Int);
        let param = stmt.param("n").unwrap();
        assert!(param.value.is_null());
        assert_eq!(param.ty, ValueType::Int);
    }
}
