//! End-to-end suites over whole documents, see `tests/integration/`.

mod integration;
