//! Cat resource: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::Cat;
pub use repository::CatRepository;
pub use service::CatService;
