//! Application services for profile registration and actor resolution.

mod profile;

pub use profile::{
    ProfileService, ProfileServiceError, ProfileServiceResult, RegisterBenefactorRequest,
    RegisterCharityRequest,
};
