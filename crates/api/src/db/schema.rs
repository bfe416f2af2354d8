//! Static description of the two tables the API reads.
//!
//! The observation database is produced by an external loader. Rather than
//! discovering its layout at runtime, the columns every query depends on are
//! declared here and checked once at startup.

use sqlx::{sqlite::SqliteConnection, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    /// Read by at least one route
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

const fn column(name: &'static str, sql_type: &'static str, nullable: bool) -> Column {
    Column {
        name,
        sql_type,
        nullable,
        required: true,
    }
}

const fn descriptive(name: &'static str, sql_type: &'static str) -> Column {
    Column {
        name,
        sql_type,
        nullable: true,
        required: false,
    }
}

pub const MEASUREMENT: Table = Table {
    name: "measurement",
    columns: &[
        descriptive("id", "INTEGER"),
        column("station", "TEXT", false),
        column("date", "TEXT", false),
        column("prcp", "FLOAT", true),
        column("tobs", "FLOAT", false),
    ],
};

pub const STATION: Table = Table {
    name: "station",
    columns: &[
        descriptive("id", "INTEGER"),
        column("station", "TEXT", false),
        column("name", "TEXT", false),
        descriptive("latitude", "FLOAT"),
        descriptive("longitude", "FLOAT"),
        descriptive("elevation", "FLOAT"),
    ],
};

pub const TABLES: [Table; 2] = [MEASUREMENT, STATION];

#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("Failed to inspect table `{table}`: {source}")]
    Inspect {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Table `{0}` does not exist")]
    MissingTable(&'static str),
    #[error("Table `{table}` is missing column(s): {}", columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<&'static str>,
    },
}

impl Table {
    /// `CREATE TABLE` statement matching this declaration
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let mut def = format!("{} {}", c.name, c.sql_type);
                if c.name == "id" {
                    def.push_str(" PRIMARY KEY");
                } else if !c.nullable {
                    def.push_str(" NOT NULL");
                }
                def
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }

    /// Required columns the stored table lacks
    pub fn missing_columns(&self, present: &[String]) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.required)
            .filter(|c| !present.iter().any(|p| p.eq_ignore_ascii_case(c.name)))
            .map(|c| c.name)
            .collect()
    }

    pub async fn verify(&self, conn: &mut SqliteConnection) -> Result<(), SchemaError> {
        let rows = sqlx::query(&format!("PRAGMA table_info({})", self.name))
            .fetch_all(&mut *conn)
            .await
            .map_err(|source| SchemaError::Inspect {
                table: self.name,
                source,
            })?;
        if rows.is_empty() {
            return Err(SchemaError::MissingTable(self.name));
        }

        let present: Vec<String> = rows.iter().map(|row| row.get("name")).collect();
        let missing = self.missing_columns(&present);
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns {
                table: self.name,
                columns: missing,
            });
        }
        Ok(())
    }
}

pub async fn verify_schema(conn: &mut SqliteConnection) -> Result<(), SchemaError> {
    for table in TABLES {
        table.verify(conn).await?;
    }
    Ok(())
}
