// # Routes Module
//
// - HTTP route handlers for the register relay.
//
//  ## Available Route Modules
// - `health`: Health check endpoint
// - `register`: Register program submission endpoint

/// Health check and monitoring endpoints
pub mod health;

/// Register program submission endpoint
pub mod register;
