//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::models::Practitioner;
use crate::query::ResultEnvelope;

/// Pagination block of a listing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

/// Response for `GET /api/doctors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Practitioner>,
    pub pagination: Pagination,
}

impl From<ResultEnvelope> for ListResponse {
    fn from(envelope: ResultEnvelope) -> Self {
        Self {
            success: true,
            pagination: Pagination {
                total: envelope.total,
                page: envelope.page,
                limit: envelope.page_size,
                total_pages: envelope.total_pages,
            },
            data: envelope.items,
        }
    }
}

/// Response carrying a single practitioner (create and lookup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PractitionerResponse {
    pub success: bool,
    pub data: Practitioner,
}

impl From<Practitioner> for PractitionerResponse {
    fn from(data: Practitioner) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
