pub type Tx<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
