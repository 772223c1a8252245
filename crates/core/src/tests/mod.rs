//! Reusable test harnesses for third-party implementations
