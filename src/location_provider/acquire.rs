use crate::app_config::Acquisition;
use crate::domain::{Address, Coordinate, GeoFix, LocationState};
use crate::platform::{LocationPlatform, Permission, PlatformError};
use std::time::Duration;
use tokio::sync::watch::Sender;
use tokio::time::timeout;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, instrument, warn};

/// Runs permission, fix and reverse geocoding in sequence, publishing every state change.
#[instrument(skip_all)]
pub async fn acquire(platform: &dyn LocationPlatform, settings: &Acquisition, state_tx: &Sender<LocationState>) {
    if request_permission(platform, settings).await == Permission::Denied {
        state_tx.send_replace(LocationState::denied());
        return;
    }

    let fix = match read_fix(platform, settings).await {
        Ok(fix) => fix,
        Err(error) => {
            state_tx.send_replace(LocationState::FixUnavailable { message: error.to_string() });
            return;
        }
    };
    state_tx.send_replace(LocationState::FixAcquired { fix: fix.clone() });

    let address = reverse_geocode(platform, settings, fix.coordinate).await;
    state_tx.send_replace(LocationState::Ready { fix, address });
}

async fn request_permission(platform: &dyn LocationPlatform, settings: &Acquisition) -> Permission {
    info!("🔐 Requesting location permission...");
    let answer = timeout(settings.permission_timeout(), platform.request_foreground_permission()).await;
    match answer {
        Ok(Ok(Permission::Granted)) => {
            info!("🔐 Requesting location permission... OK");
            Permission::Granted
        }
        Ok(Ok(Permission::Denied)) => {
            warn!("🔐 Requesting location permission... denied");
            Permission::Denied
        }
        Ok(Err(error)) => {
            warn!("🔐 Requesting location permission... failed, {}", error);
            Permission::Denied
        }
        Err(_) => {
            warn!("🔐 Requesting location permission... no answer after {:?}", settings.permission_timeout());
            Permission::Denied
        }
    }
}

async fn read_fix(platform: &dyn LocationPlatform, settings: &Acquisition) -> Result<GeoFix, PlatformError> {
    let fix_timeout = settings.fix_timeout();
    let strategy = retry_delays(settings).take(settings.fix_attempts() - 1);

    info!("📍 Reading current position...");
    let fix = Retry::spawn(strategy, || async move {
        let result = match timeout(fix_timeout, platform.current_fix()).await {
            Ok(result) => result,
            Err(_) => Err(PlatformError::Timeout(fix_timeout)),
        };
        if let Err(error) = &result {
            warn!("⚠️ Reading current position failed: {}", error);
        }
        result
    })
    .await;

    match &fix {
        Ok(fix) => info!(latitude = fix.coordinate.latitude, longitude = fix.coordinate.longitude, "📍 Reading current position... OK"),
        Err(error) => warn!("📍 Reading current position... failed after {} attempt(s), {}", settings.fix_attempts(), error),
    }
    fix
}

/// Doubling waits starting at twice `fix_retry_delay`, capped by `fix_retry_max_delay`, each jittered.
fn retry_delays(settings: &Acquisition) -> impl Iterator<Item = Duration> + use<> {
    let retry_delay_ms = settings.fix_retry_delay().as_millis() as u64;
    ExponentialBackoff::from_millis(2)
        .factor(retry_delay_ms)
        .max_delay(settings.fix_retry_max_delay())
        .map(jitter)
}

async fn reverse_geocode(platform: &dyn LocationPlatform, settings: &Acquisition, coordinate: Coordinate) -> Option<Address> {
    info!("🏠 Resolving address...");
    let addresses = match timeout(settings.geocode_timeout(), platform.reverse_geocode(coordinate)).await {
        Ok(Ok(addresses)) => addresses,
        Ok(Err(error)) => {
            warn!("🏠 Resolving address... failed, {}", error);
            return None;
        }
        Err(_) => {
            warn!("🏠 Resolving address... no answer after {:?}", settings.geocode_timeout());
            return None;
        }
    };

    let found = addresses.len();
    let address = addresses.into_iter().next();
    info!("🏠 Resolving address... OK, {} found", found);
    address
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::{LocationStatus, PERMISSION_DENIED_MESSAGE};
    use crate::platform::scripted::{ScriptedPlatform, sample_address, sample_fix};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use test_log::test;
    use tokio::sync::{Notify, watch};

    async fn run(platform: &ScriptedPlatform, settings: &Acquisition) -> LocationState {
        let (state_tx, _state_rx) = watch::channel(LocationState::Pending);
        acquire(platform, settings, &state_tx).await;
        state_tx.borrow().clone()
    }

    #[test(tokio::test)]
    async fn denied_permission_stops_without_a_fix() {
        let platform = ScriptedPlatform::denied();
        let settings = AppConfigBuilder::new().build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state, LocationState::Denied { message: PERMISSION_DENIED_MESSAGE.to_string() });
        assert!(state.fix().is_none());
        assert!(state.address().is_none());
        assert_eq!(platform.fix_calls(), 0);
        assert_eq!(platform.geocode_calls(), 0);
    }

    #[test(tokio::test)]
    async fn permission_request_error_is_denied() {
        let platform = ScriptedPlatform::granted().failing_permission();
        let settings = AppConfigBuilder::new().build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state, LocationState::denied());
        assert_eq!(platform.fix_calls(), 0);
    }

    #[test(tokio::test)]
    async fn unanswered_permission_prompt_is_denied() {
        let platform = ScriptedPlatform::granted().permission_delay(Duration::from_secs(5));
        let settings = AppConfigBuilder::new().permission_timeout(Duration::from_millis(20)).build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state, LocationState::denied());
        assert_eq!(platform.fix_calls(), 0);
    }

    #[test(tokio::test)]
    async fn granted_permission_resolves_fix_and_first_address() {
        let mut other_address = sample_address();
        other_address.street = Some("Rua Sete de Setembro".to_string());
        let platform = ScriptedPlatform::granted().addresses(vec![sample_address(), other_address]);
        let settings = AppConfigBuilder::new().build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(
            state,
            LocationState::Ready {
                fix: sample_fix(),
                address: Some(sample_address())
            }
        );
    }

    #[test(tokio::test)]
    async fn empty_geocode_result_is_ready_without_address() {
        let platform = ScriptedPlatform::granted().addresses(Vec::new());
        let settings = AppConfigBuilder::new().build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state.status(), LocationStatus::Ready);
        assert_eq!(state.fix(), Some(&sample_fix()));
        assert!(state.address().is_none());
    }

    #[test(tokio::test)]
    async fn failed_geocode_is_ready_without_address() {
        let platform = ScriptedPlatform::granted().failing_geocode();
        let settings = AppConfigBuilder::new().build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state.status(), LocationStatus::Ready);
        assert!(state.address().is_none());
    }

    #[test(tokio::test)]
    async fn slow_geocode_is_ready_without_address() {
        let gate = Arc::new(Notify::new());
        let platform = ScriptedPlatform::granted().geocode_gate(gate);
        let settings = AppConfigBuilder::new().geocode_timeout(Duration::from_millis(20)).build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state, LocationState::Ready { fix: sample_fix(), address: None });
    }

    #[test(tokio::test)]
    async fn transient_fix_failures_are_retried() {
        let platform = ScriptedPlatform::granted().failing_fixes(2);
        let settings = AppConfigBuilder::new().fix_attempts(3).build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state.status(), LocationStatus::Ready);
        assert_eq!(platform.fix_calls(), 3);
    }

    #[test(tokio::test)]
    async fn exhausted_fix_attempts_are_unavailable() {
        let platform = ScriptedPlatform::granted().without_fix();
        let settings = AppConfigBuilder::new().fix_attempts(2).build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state.status(), LocationStatus::FixUnavailable);
        assert_eq!(state.error_message(), Some("location fix unavailable: no satellites in view"));
        assert_eq!(platform.fix_calls(), 2);
        assert_eq!(platform.geocode_calls(), 0);
    }

    #[test]
    fn retry_delays_double_up_to_the_maximum() {
        let settings = AppConfigBuilder::new().build().acquisition().clone();

        let delays = retry_delays(&settings).take(5).collect::<Vec<_>>();

        let bounds = [2, 4, 8, 10, 10].map(Duration::from_millis);
        for (delay, bound) in delays.iter().zip(bounds) {
            assert!(*delay <= bound, "expected {:?} to be at most {:?}", delay, bound);
        }
        assert_eq!(delays.len(), 5);
    }

    #[test(tokio::test)]
    async fn slow_fix_times_out() {
        let platform = ScriptedPlatform::granted().fix_delay(Duration::from_secs(5));
        let settings = AppConfigBuilder::new().fix_timeout(Duration::from_millis(20)).build().acquisition().clone();

        let state = run(&platform, &settings).await;

        assert_eq!(state.status(), LocationStatus::FixUnavailable);
        assert_eq!(state.error_message(), Some("timed out after 20ms"));
    }
}
