//! Field validation: every rule is evaluated, nothing short-circuits, so one
//! response carries every violation.

use crate::error::{AppError, FieldErrorMap};
use crate::model::ScaleCandidate;
use crate::sql::{Filters, Sort};
use chrono::{Datelike, Utc};

/// Accumulates per-field messages. The first message recorded for a field
/// wins; later checks on the same field do not overwrite it.
#[derive(Debug, Default)]
pub struct FieldErrors(FieldErrorMap);

impl FieldErrors {
    /// Record `message` under `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.0
                .entry(field.to_string())
                .or_insert_with(|| message.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

/// Check a write candidate. Pure; callers must reject the request before any
/// store interaction when the result is non-empty.
pub fn validate_scale(c: &ScaleCandidate) -> FieldErrors {
    let mut errors = FieldErrors::default();

    errors.check(!c.model.is_empty(), "model", "must be provided");
    errors.check(c.model.len() <= 100, "model", "must not be more than 100 bytes long");

    errors.check(c.year != 0, "year", "must be provided");
    errors.check(c.year >= 2000, "year", "must be at least 2000");
    errors.check(c.year <= Utc::now().year(), "year", "must not be in the future");

    errors.check(c.runtime != 0, "runtime", "must be provided");
    errors.check(c.runtime > 0, "runtime", "must be a positive integer");

    errors.check(c.dimensions.is_some(), "dimensions", "must be provided");
    if let Some(dims) = &c.dimensions {
        errors.check(dims.len() == 3, "dimensions", "must contain exactly 3 numbers");
    }

    errors.check(c.price != 0.0, "price", "must be provided");
    errors.check(c.price > 0.0, "price", "must be a positive number");
    errors.check(c.price <= 1000.0, "price", "must be cheaper than 1000");

    errors
}

/// Resolve list-query parameters into validated [`Filters`]. Absent params
/// take the defaults (page 1, page size 20, ascending id). An unknown sort
/// token is a validation error, never forwarded to the store.
pub fn resolve_filters(
    page: Option<i64>,
    page_size: Option<i64>,
    sort: Option<&str>,
) -> Result<Filters, AppError> {
    let mut errors = FieldErrors::default();
    let defaults = Filters::default();

    let page = page.unwrap_or(defaults.page);
    let page_size = page_size.unwrap_or(defaults.page_size);

    errors.check(page > 0, "page", "must be greater than zero");
    errors.check(page <= 10_000_000, "page", "must be a maximum of 10 million");
    errors.check(page_size > 0, "page_size", "must be greater than zero");
    errors.check(page_size <= 100, "page_size", "must be a maximum of 100");

    let sort = match sort {
        None => defaults.sort,
        Some(token) => match Sort::parse(token) {
            Some(sort) => sort,
            None => {
                errors.check(false, "sort", "invalid sort value");
                defaults.sort
            }
        },
    };

    errors.into_result()?;
    Ok(Filters { page, page_size, sort })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_candidate() -> ScaleCandidate {
        ScaleCandidate {
            model: "Escali Primo Digital Scale".into(),
            price: 15.0,
            year: 2022,
            dimensions: Some(vec![8.5, 6.0, 1.5]),
            runtime: 102,
        }
    }

    #[test]
    fn valid_candidate_passes() {
        assert!(validate_scale(&valid_candidate()).is_empty());
    }

    #[test]
    fn all_violations_surface_in_one_call() {
        let errors = validate_scale(&ScaleCandidate::default())
            .into_result()
            .unwrap_err();
        let AppError::Validation(fields) = errors else {
            panic!("expected validation error");
        };
        for field in ["model", "year", "runtime", "dimensions", "price"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn short_dimensions_reported_alongside_other_fields() {
        let candidate = ScaleCandidate {
            dimensions: Some(vec![8.5, 6.0]),
            year: 1999,
            ..valid_candidate()
        };
        let AppError::Validation(fields) = validate_scale(&candidate).into_result().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(fields["dimensions"], "must contain exactly 3 numbers");
        assert_eq!(fields["year"], "must be at least 2000");
    }

    #[test]
    fn first_message_per_field_wins() {
        let candidate = ScaleCandidate {
            runtime: -5,
            ..valid_candidate()
        };
        let errors = validate_scale(&candidate);
        let AppError::Validation(fields) = errors.into_result().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(fields["runtime"], "must be a positive integer");
    }

    #[test]
    fn model_over_100_bytes_rejected() {
        let candidate = ScaleCandidate {
            model: "x".repeat(101),
            ..valid_candidate()
        };
        assert!(!validate_scale(&candidate).is_empty());
    }

    #[test]
    fn future_year_rejected() {
        let candidate = ScaleCandidate {
            year: Utc::now().year() + 1,
            ..valid_candidate()
        };
        assert!(!validate_scale(&candidate).is_empty());
    }

    #[test]
    fn price_bounds() {
        let cheap = ScaleCandidate { price: 0.0, ..valid_candidate() };
        let negative = ScaleCandidate { price: -3.0, ..valid_candidate() };
        let steep = ScaleCandidate { price: 1000.5, ..valid_candidate() };
        assert!(!validate_scale(&cheap).is_empty());
        assert!(!validate_scale(&negative).is_empty());
        assert!(!validate_scale(&steep).is_empty());
        let max = ScaleCandidate { price: 1000.0, ..valid_candidate() };
        assert!(validate_scale(&max).is_empty());
    }

    #[test]
    fn filters_defaults() {
        let filters = resolve_filters(None, None, None).unwrap();
        assert_eq!(filters.page, 1);
        assert_eq!(filters.page_size, 20);
        assert_eq!(filters.sort, Sort::default());
    }

    #[test]
    fn filters_reject_out_of_range_pages() {
        assert!(resolve_filters(Some(0), None, None).is_err());
        assert!(resolve_filters(Some(10_000_001), None, None).is_err());
        assert!(resolve_filters(None, Some(0), None).is_err());
        assert!(resolve_filters(None, Some(101), None).is_err());
    }

    #[test]
    fn filters_reject_unknown_sort_token() {
        let err = resolve_filters(None, None, Some("model;DROP TABLE food_scales")).unwrap_err();
        let AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields["sort"], "invalid sort value");
    }

    #[test]
    fn filters_accumulate_with_sort_error() {
        let err = resolve_filters(Some(-1), Some(500), Some("price")).unwrap_err();
        let AppError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("page"));
        assert!(fields.contains_key("page_size"));
        assert!(fields.contains_key("sort"));
    }
}
