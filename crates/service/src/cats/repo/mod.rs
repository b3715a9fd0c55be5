pub mod memory;
pub mod seaorm;

pub use memory::InMemoryCatRepository;
pub use seaorm::SeaOrmCatRepository;
