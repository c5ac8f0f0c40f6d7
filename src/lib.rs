//! Workspace root package; anchors shared tooling (git hooks).
