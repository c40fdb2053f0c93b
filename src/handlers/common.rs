use crate::{config::AppConfig, errors::ServiceError};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input.validate().map_err(ServiceError::from)
}

pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// 0 to 100 inclusive
pub fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new("percentage"));
    }
    Ok(())
}

/// Applies configured defaults and bounds to raw pagination query values.
pub fn resolve_pagination(
    page: Option<u64>,
    per_page: Option<u64>,
    config: &AppConfig,
) -> Result<(u64, u64), ServiceError> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(config.api_default_page_size);

    if page == 0 {
        return Err(ServiceError::ValidationError(
            "page must be greater than zero".to_string(),
        ));
    }
    if per_page == 0 {
        return Err(ServiceError::ValidationError(
            "per_page must be greater than zero".to_string(),
        ));
    }
    if per_page > config.api_max_page_size {
        return Err(ServiceError::ValidationError(format!(
            "per_page cannot exceed {}",
            config.api_max_page_size
        )));
    }

    Ok((page, per_page))
}

/// Standard paginated list response
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };

        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
