// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Schema-agnostic projection of backend records into a header plus rows.
//!
//! The first record (the anchor) decides the columns and their order. Later
//! records are read only through those columns: a missing field renders as an
//! empty cell and fields the anchor does not have are never looked at.

use crate::Record;

pub const NO_RESULTS: &str = "Nenhum registro encontrado.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableModel {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl TableModel {
    pub fn from_records(records: &[Record]) -> Self {
        let Some(anchor) = records.first() else {
            return Self::default();
        };

        let columns = anchor
            .keys()
            .map(|key| TableColumn {
                key: key.to_owned(),
                label: header_label(key),
            })
            .collect::<Vec<_>>();

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        record
                            .get(&column.key)
                            .map(|value| value.display())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// `Some` when the table has nothing to show and the caller should render
    /// the placeholder message instead of an empty grid.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(NO_RESULTS)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Widest rendered text per column, header included, in characters.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

pub fn header_label(key: &str) -> String {
    key.replace('_', " ")
}
