// ABOUTME: Test helper module declarations
// ABOUTME: Exposes the axum oneshot request helper to route tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

pub mod axum_test;
