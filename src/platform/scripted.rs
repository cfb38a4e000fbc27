use crate::domain::{Address, Coordinate, GeoFix};
use crate::platform::{LocationPlatform, Permission, PlatformError};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

/// In-memory platform whose answers are set up front.
#[derive(Debug)]
pub struct ScriptedPlatform {
    permission: Permission,
    permission_fails: bool,
    permission_delay: Option<Duration>,
    fix: Option<GeoFix>,
    fix_failures: AtomicUsize,
    fix_delay: Option<Duration>,
    addresses: Vec<Address>,
    geocode_fails: bool,
    geocode_gate: Option<Arc<Notify>>,
    fix_calls: AtomicUsize,
    geocode_calls: AtomicUsize,
}

pub fn sample_fix() -> GeoFix {
    let mut fix = GeoFix::new(Coordinate::new(-21.55, -45.42), Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap());
    fix.accuracy = Some(12.5);
    fix
}

pub fn sample_address() -> Address {
    Address {
        street: Some("Rua Direita".to_string()),
        street_number: Some("120".to_string()),
        district: Some("Centro".to_string()),
        region: Some("Minas Gerais".to_string()),
        postal_code: Some("37190-000".to_string()),
        country: Some("Brasil".to_string()),
    }
}

impl ScriptedPlatform {
    pub fn granted() -> Self {
        ScriptedPlatform {
            permission: Permission::Granted,
            permission_fails: false,
            permission_delay: None,
            fix: Some(sample_fix()),
            fix_failures: AtomicUsize::new(0),
            fix_delay: None,
            addresses: vec![sample_address()],
            geocode_fails: false,
            geocode_gate: None,
            fix_calls: AtomicUsize::new(0),
            geocode_calls: AtomicUsize::new(0),
        }
    }

    pub fn denied() -> Self {
        ScriptedPlatform {
            permission: Permission::Denied,
            ..ScriptedPlatform::granted()
        }
    }

    pub fn failing_permission(mut self) -> Self {
        self.permission_fails = true;
        self
    }

    /// Leaves the permission prompt unanswered for `delay`.
    pub fn permission_delay(mut self, delay: Duration) -> Self {
        self.permission_delay = Some(delay);
        self
    }

    pub fn fix(mut self, fix: GeoFix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn without_fix(mut self) -> Self {
        self.fix = None;
        self
    }

    /// Fails the first `failures` fix reads.
    pub fn failing_fixes(self, failures: usize) -> Self {
        self.fix_failures.store(failures, Ordering::SeqCst);
        self
    }

    pub fn fix_delay(mut self, delay: Duration) -> Self {
        self.fix_delay = Some(delay);
        self
    }

    pub fn addresses(mut self, addresses: Vec<Address>) -> Self {
        self.addresses = addresses;
        self
    }

    pub fn failing_geocode(mut self) -> Self {
        self.geocode_fails = true;
        self
    }

    /// Holds every reverse geocode call until the gate is notified.
    pub fn geocode_gate(mut self, gate: Arc<Notify>) -> Self {
        self.geocode_gate = Some(gate);
        self
    }

    pub fn fix_calls(&self) -> usize {
        self.fix_calls.load(Ordering::SeqCst)
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationPlatform for ScriptedPlatform {
    async fn request_foreground_permission(&self) -> Result<Permission, PlatformError> {
        if let Some(delay) = self.permission_delay {
            tokio::time::sleep(delay).await;
        }

        if self.permission_fails {
            return Err(PlatformError::FixUnavailable("location services are disabled".to_string()));
        }

        Ok(self.permission)
    }

    async fn current_fix(&self) -> Result<GeoFix, PlatformError> {
        self.fix_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fix_delay {
            tokio::time::sleep(delay).await;
        }

        let remaining_failures = self
            .fix_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |failures| failures.checked_sub(1));
        if remaining_failures.is_ok() {
            return Err(PlatformError::FixUnavailable("no satellites in view".to_string()));
        }

        self.fix.clone().ok_or_else(|| PlatformError::FixUnavailable("no satellites in view".to_string()))
    }

    async fn reverse_geocode(&self, _coordinate: Coordinate) -> Result<Vec<Address>, PlatformError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.geocode_gate {
            gate.notified().await;
        }

        if self.geocode_fails {
            return Err(PlatformError::Timeout(Duration::from_secs(5)));
        }

        Ok(self.addresses.clone())
    }
}
