// src/services/mod.rs
pub mod color;
pub mod concept_service;
pub mod llm_service;
pub mod session_service;

#[cfg(test)]
pub mod testing;

pub use concept_service::ConceptService;
pub use session_service::SessionService;
