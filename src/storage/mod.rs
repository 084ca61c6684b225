mod store;

pub use store::BoardStore;
