//! Auth types shared across Alokah services.
//!
//! Provides JWT validation, the refresh-token cookie builders, the
//! `BearerToken` extractor, and the user role type.

pub mod bearer;
pub mod cookie;
pub mod role;
pub mod token;
