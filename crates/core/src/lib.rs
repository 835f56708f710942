//! Request schemas and validation for the TSQMI quality-model pipeline.
//!
//! Raw metric series are grouped into measures, measures are weighted into
//! sub-characteristics, sub-characteristics into characteristics, and
//! characteristics into the Total Software Quality Model Index (TSQMI).
//! This crate validates the request bodies exchanged at each level; the
//! calculations themselves live elsewhere.
//!
//! ```
//! use serde_json::json;
//! use tsqmi_core::schema::hierarchy::CalculateTsqmiRequest;
//! use tsqmi_core::validation::validate;
//!
//! let body = json!({
//!     "tsqmi": {
//!         "key": "tsqmi",
//!         "characteristics": [{"key": "reliability", "value": -0.1, "weight": 50}]
//!     }
//! });
//! let errors = validate::<CalculateTsqmiRequest>(&body).unwrap_err();
//! assert_eq!(errors.paths(), vec!["tsqmi.characteristics[0].value"]);
//! ```

pub mod error;
pub mod measure_catalog;
pub mod schema;
pub mod validation;
