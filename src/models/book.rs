//! Book (catalog entry) model

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

const MAX_TITLE_LEN: usize = 200;
const MAX_AUTHOR_LEN: usize = 100;

/// Book from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Number of copies held
    pub quantity: i32,
}

/// Add-book form; every field arrives as text
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Blank means one copy
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Validated book ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub quantity: i32,
}

impl TryFrom<CreateBook> for NewBook {
    type Error = AppError;

    fn try_from(form: CreateBook) -> AppResult<Self> {
        let title = form.title.trim();
        let author = form.author.trim();

        if title.is_empty() || author.is_empty() {
            return Err(AppError::InvalidInput(
                "title and author are required".to_string(),
            ));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::InvalidInput(format!(
                "title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }
        if author.chars().count() > MAX_AUTHOR_LEN {
            return Err(AppError::InvalidInput(format!(
                "author must be at most {} characters",
                MAX_AUTHOR_LEN
            )));
        }

        let quantity = match form.quantity.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => parse_quantity(raw)?,
        };

        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            quantity,
        })
    }
}

fn parse_quantity(raw: &str) -> AppResult<i32> {
    match raw.parse::<i32>() {
        Ok(quantity) if quantity >= 0 => Ok(quantity),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(AppError::InvalidInput(format!(
            "quantity is out of range, at most {} copies can be recorded",
            i32::MAX
        ))),
        _ => Err(AppError::InvalidInput(format!(
            "quantity must be a non-negative integer, got '{}'",
            raw
        ))),
    }
}
