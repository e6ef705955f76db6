// DDL for the storage tables, run with `CREATE TABLE IF NOT EXISTS` at startup.

#[derive(Debug)]
pub struct ColumnSchema {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub primary: bool,
    pub unique: bool,
    pub not_null: bool,
    pub references: Option<&'static str>,
    pub default: Option<&'static str>,
}

impl ColumnSchema {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            primary: false,
            unique: false,
            not_null: false,
            references: None,
            default: None,
        }
    }

    pub const fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn references(mut self, target: &'static str) -> Self {
        self.references = Some(target);
        self
    }

    pub const fn default(mut self, expr: &'static str) -> Self {
        self.default = Some(expr);
        self
    }

    fn definition(&self) -> String {
        let mut col_def = format!("{} {}", self.name, self.sql_type);
        if self.primary {
            col_def.push_str(" PRIMARY KEY")
        }
        if self.unique {
            col_def.push_str(" UNIQUE")
        }
        if self.not_null {
            col_def.push_str(" NOT NULL")
        }
        if let Some(default) = self.default {
            col_def.push_str(&format!(" DEFAULT {default}"))
        }
        if let Some(target) = self.references {
            col_def.push_str(&format!(" REFERENCES {target}"))
        }
        col_def
    }
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSchema],
    /// Table-level key for composite identities; empty when a column is `primary`.
    pub primary_key: &'static [&'static str],
}

impl TableSchema {
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnSchema::definition).collect();
        if !self.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, parts.join(", "))
    }
}

const USER_COLUMNS: &[ColumnSchema] = &[
    ColumnSchema::new("user_id", "SERIAL").primary(),
    ColumnSchema::new("email", "VARCHAR(255)").unique().not_null(),
    ColumnSchema::new("given_name", "VARCHAR(100)").not_null(),
    ColumnSchema::new("surname", "VARCHAR(100)").not_null(),
    ColumnSchema::new("city", "VARCHAR(100)"),
    ColumnSchema::new("phone_number", "VARCHAR(20)"),
    ColumnSchema::new("profile_description", "TEXT"),
    ColumnSchema::new("password", "VARCHAR(255)").not_null(),
];

const CAREGIVER_COLUMNS: &[ColumnSchema] = &[
    ColumnSchema::new("caregiver_user_id", "INTEGER")
        .primary()
        .references("\"USER\"(user_id)"),
    ColumnSchema::new("photo", "VARCHAR(500)"),
    ColumnSchema::new("gender", "VARCHAR(10)"),
    ColumnSchema::new("caregiving_type", "VARCHAR(50)"),
    ColumnSchema::new("hourly_rate", "DECIMAL(10,2)"),
];

const MEMBER_COLUMNS: &[ColumnSchema] = &[
    ColumnSchema::new("member_user_id", "INTEGER")
        .primary()
        .references("\"USER\"(user_id)"),
    ColumnSchema::new("house_rules", "TEXT"),
    ColumnSchema::new("dependent_description", "TEXT"),
];

const ADDRESS_COLUMNS: &[ColumnSchema] = &[
    ColumnSchema::new("member_user_id", "INTEGER")
        .primary()
        .references("MEMBER(member_user_id)"),
    ColumnSchema::new("house_number", "VARCHAR(20)"),
    ColumnSchema::new("street", "VARCHAR(200)"),
    ColumnSchema::new("town", "VARCHAR(100)"),
];

const JOB_COLUMNS: &[ColumnSchema] = &[
    ColumnSchema::new("job_id", "SERIAL").primary(),
    ColumnSchema::new("member_user_id", "INTEGER").references("MEMBER(member_user_id)"),
    ColumnSchema::new("required_caregiving_type", "VARCHAR(50)"),
    ColumnSchema::new("other_requirements", "TEXT"),
    ColumnSchema::new("date_posted", "DATE"),
];

const JOB_APPLICATION_COLUMNS: &[ColumnSchema] = &[
    ColumnSchema::new("caregiver_user_id", "INTEGER").references("CAREGIVER(caregiver_user_id)"),
    ColumnSchema::new("job_id", "INTEGER").references("JOB(job_id)"),
    ColumnSchema::new("date_applied", "DATE"),
];

const APPOINTMENT_COLUMNS: &[ColumnSchema] = &[
    ColumnSchema::new("appointment_id", "SERIAL").primary(),
    ColumnSchema::new("caregiver_user_id", "INTEGER").references("CAREGIVER(caregiver_user_id)"),
    ColumnSchema::new("member_user_id", "INTEGER").references("MEMBER(member_user_id)"),
    ColumnSchema::new("appointment_date", "DATE"),
    ColumnSchema::new("appointment_time", "TIME"),
    ColumnSchema::new("work_hours", "INTEGER").not_null(),
    ColumnSchema::new("status", "VARCHAR(20)").default("'pending'"),
];

/// Storage tables in dependency order.
pub const PLATFORM_SCHEMA: &[TableSchema] = &[
    TableSchema { name: "\"USER\"", columns: USER_COLUMNS, primary_key: &[] },
    TableSchema { name: "CAREGIVER", columns: CAREGIVER_COLUMNS, primary_key: &[] },
    TableSchema { name: "MEMBER", columns: MEMBER_COLUMNS, primary_key: &[] },
    TableSchema { name: "ADDRESS", columns: ADDRESS_COLUMNS, primary_key: &[] },
    TableSchema { name: "JOB", columns: JOB_COLUMNS, primary_key: &[] },
    TableSchema {
        name: "JOB_APPLICATION",
        columns: JOB_APPLICATION_COLUMNS,
        primary_key: &["caregiver_user_id", "job_id"],
    },
    TableSchema { name: "APPOINTMENT", columns: APPOINTMENT_COLUMNS, primary_key: &[] },
];
