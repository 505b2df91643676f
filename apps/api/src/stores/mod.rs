// Collaborator seams. Each trait has one production backend here and an
// in-memory double in `crate::testing`.

pub mod badges;
pub mod evaluations;
pub mod resumes;
