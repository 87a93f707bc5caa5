/*
 * Responsibility
 * - Dishes の request/response DTO
 */
use serde::{Deserialize, Serialize};

use crate::repos::dish_repo::DishRow;

#[derive(Debug, Deserialize)]
pub struct DishRequest {
    pub name: String,
    pub article: String,
    pub img_path: String,
}

impl DishRequest {
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
pub struct DishResponse {
    pub id: i64,
    pub name: String,
    pub article: String,
    pub img_path: String,
    pub country_id: i64,
}

impl From<DishRow> for DishResponse {
    fn from(row: DishRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            article: row.article,
            img_path: row.img_path,
            country_id: row.country_id,
        }
    }
}
