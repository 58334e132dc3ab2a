//! Generated protobuf and tonic code for the task tracker API.
//!
//! Sources live in `proto/`; regenerate with `buf generate` from this crate's
//! directory. Validation rules are attached to the generated types through
//! `buf.gen.yaml` and implemented in [`validation`].

pub mod validation;

pub mod tasks {
    pub mod v1 {
        // The derived `nested` rule calls `validate()` on message fields.
        use validator::Validate;

        include!("generated/tasks/v1/tasks.v1.rs");
        // tasks.v1.tonic.rs is included by tasks.v1.rs
    }
}
