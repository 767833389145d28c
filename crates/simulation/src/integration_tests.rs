//! Integration tests using the `TestDrive` harness and seeded generation
//! sweeps. Unit tests live next to each module.
