use tabled::{Table, Tabled, settings::Style};

use crate::storage::ColumnInfo;

#[derive(Tabled)]
pub struct TableListRow {
    #[tabled(rename = "Table")]
    pub table: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
}

/// Render the table listing with row counts
pub fn table_list(entries: &[(String, usize)]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let rows: Vec<TableListRow> = entries
        .iter()
        .map(|(table, rows)| TableListRow {
            table: table.clone(),
            rows: *rows,
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
pub struct ColumnRow {
    #[tabled(rename = "Column")]
    pub column: String,
    #[tabled(rename = "Type")]
    pub decl_type: String,
    #[tabled(rename = "Null")]
    pub null: String,
    #[tabled(rename = "PK")]
    pub pk: String,
}

/// Render one table's column layout
pub fn schema_table(columns: &[ColumnInfo]) -> String {
    if columns.is_empty() {
        return String::new();
    }

    let rows: Vec<ColumnRow> = columns
        .iter()
        .map(|c| ColumnRow {
            column: c.name.clone(),
            decl_type: c.decl_type.clone(),
            null: if c.notnull { "NOT NULL" } else { "" }.to_string(),
            pk: if c.pk { "*" } else { "" }.to_string(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_render_nothing() {
        assert_eq!(table_list(&[]), "");
        assert_eq!(schema_table(&[]), "");
    }

    #[test]
    fn test_table_list_contains_entries() {
        let rendered = table_list(&[("QuarTable".to_string(), 3), ("Signatures".to_string(), 0)]);
        assert!(rendered.contains("QuarTable"));
        assert!(rendered.contains("Signatures"));
        assert!(rendered.contains('3'));
    }
}
