/*
 * Responsibility
 * - Countries の request/response DTO
 * - response は集計列 (rate_count / average_rating) を常に含む
 */
use serde::{Deserialize, Serialize};

use crate::repos::country_repo::CountryRow;

#[derive(Debug, Deserialize)]
pub struct CountryRequest {
    pub name: String,
    pub article: String,
    pub img_path: String,
}

impl CountryRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().chars().count() < 2 {
            return Err("name must be at least 2 chars");
        }
        if self.article.trim().chars().count() < 10 {
            return Err("article must be at least 10 chars");
        }
        if self.img_path.trim().chars().count() < 6 {
            return Err("img_path must be at least 6 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CountryResponse {
    pub id: i64,
    pub name: String,
    pub article: String,
    pub img_path: String,
    pub rate_count: i32,
    // Meaningless while rate_count == 0.
    pub average_rating: f64,
}

impl From<CountryRow> for CountryResponse {
    fn from(row: CountryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            article: row.article,
            img_path: row.img_path,
            rate_count: row.rate_count,
            average_rating: row.average_rating,
        }
    }
}
