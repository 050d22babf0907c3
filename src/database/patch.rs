use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Builder for partial `UPDATE` statements. Column names are `&'static str`
/// literals supplied by the calling service; values always go through bind
/// parameters, never into the SQL text.
pub struct Patch<'args> {
    builder: QueryBuilder<'args, Postgres>,
    fields: usize,
}

impl<'args> Patch<'args> {
    pub fn new(table: &str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {} SET ", table)),
            fields: 0,
        }
    }

    pub fn set<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send,
    {
        if self.fields > 0 {
            self.builder.push(", ");
        }
        self.builder.push(column).push(" = ").push_bind(value);
        self.fields += 1;
        self
    }

    /// Stamp a timestamp column with `NOW()`. Callers check `is_empty`
    /// first; a patch that only touches a timestamp is still rejected.
    pub fn set_now(&mut self, column: &'static str) -> &mut Self {
        if self.fields > 0 {
            self.builder.push(", ");
        }
        self.builder.push(column).push(" = NOW()");
        self.fields += 1;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields == 0
    }

    /// Finish the statement with a `WHERE id = $n RETURNING ...` tail.
    pub fn by_id(mut self, id: Uuid, returning: &str) -> QueryBuilder<'args, Postgres> {
        self.builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(returning);
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_placeholders_in_order() {
        let mut patch = Patch::new("jobs");
        patch.set("title", "Welder".to_string());
        patch.set("department", Some("Plant A".to_string()));
        let mut builder = patch.by_id(Uuid::nil(), "id, title");
        assert_eq!(
            builder.sql(),
            "UPDATE jobs SET title = $1, department = $2 WHERE id = $3 RETURNING id, title"
        );
    }

    #[test]
    fn binds_null_for_cleared_fields() {
        let mut patch = Patch::new("jobs");
        patch.set("employee", Option::<String>::None);
        let mut builder = patch.by_id(Uuid::nil(), "id");
        assert_eq!(
            builder.sql(),
            "UPDATE jobs SET employee = $1 WHERE id = $2 RETURNING id"
        );
    }

    #[test]
    fn timestamp_columns_take_no_placeholder() {
        let mut patch = Patch::new("candidates");
        patch.set("notes", Some("call back".to_string()));
        patch.set_now("updated_at");
        let mut builder = patch.by_id(Uuid::nil(), "id");
        assert_eq!(
            builder.sql(),
            "UPDATE candidates SET notes = $1, updated_at = NOW() WHERE id = $2 RETURNING id"
        );
    }

    #[test]
    fn empty_patch_is_detectable() {
        let patch = Patch::new("jobs");
        assert!(patch.is_empty());
    }
}
