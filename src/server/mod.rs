pub mod app;
pub mod envelope;
pub mod routes;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
