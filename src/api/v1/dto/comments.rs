/*
 * Responsibility
 * - Comments の request/response DTO
 */
use serde::{Deserialize, Serialize};

use crate::repos::comment_repo::CommentRow;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl CommentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        if self.body.trim().is_empty() {
            return Err("body is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub country_id: i64,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            body: row.body,
            country_id: row.country_id,
        }
    }
}
