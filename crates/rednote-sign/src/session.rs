//! Caller-owned signing session.
//!
//! A browsing session (a run of paginated calls) should present one device.
//! The session draws a [`DeviceProfile`] once and reuses it for every
//! request until [`SigningSession::rotate_device`] is called.

use rand::Rng;
use tracing::debug;

use rednote_sign_core::{Cookies, HttpMethod, Payload, SigningContext, DEVICE_ID_COOKIE};
use rednote_sign_fingerprint::DeviceProfile;

use crate::error::Result;
use crate::signer::{SignedRequest, Signer};

/// Length of one pacing window.
pub const WINDOW_MILLIS: u64 = 30_000;

/// Cookies, a stable device, and the session start time.
#[derive(Debug, Clone)]
pub struct SigningSession {
    signer: Signer,
    cookies: Cookies,
    profile: DeviceProfile,
    started_at_millis: u64,
}

impl SigningSession {
    /// Start a session. Fails when the cookies carry no `a1`.
    pub fn new(signer: Signer, cookies: Cookies, started_at_millis: u64) -> Result<Self> {
        Self::with_rng(signer, cookies, started_at_millis, &mut rand::thread_rng())
    }

    /// Start a session, drawing the device from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        signer: Signer,
        cookies: Cookies,
        started_at_millis: u64,
        rng: &mut R,
    ) -> Result<Self> {
        cookies.require(DEVICE_ID_COOKIE)?;
        Ok(Self {
            signer,
            cookies,
            profile: DeviceProfile::generate(rng),
            started_at_millis,
        })
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    /// The device presented by every request in this session.
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn started_at_millis(&self) -> u64 {
        self.started_at_millis
    }

    /// Build a context from the session cookies.
    pub fn context(
        &self,
        method: HttpMethod,
        uri: &str,
        payload: Payload,
        timestamp_millis: u64,
    ) -> Result<SigningContext> {
        Ok(SigningContext::from_cookies(
            method,
            uri,
            payload,
            &self.cookies,
            timestamp_millis,
        )?)
    }

    /// Sign a request as this session's device.
    pub fn sign_request(
        &self,
        method: HttpMethod,
        uri: &str,
        payload: Payload,
        timestamp_millis: u64,
    ) -> Result<SignedRequest> {
        self.sign_request_with_rng(method, uri, payload, timestamp_millis, &mut rand::thread_rng())
    }

    pub fn sign_request_with_rng<R: Rng + ?Sized>(
        &self,
        method: HttpMethod,
        uri: &str,
        payload: Payload,
        timestamp_millis: u64,
        rng: &mut R,
    ) -> Result<SignedRequest> {
        let ctx = self.context(method, uri, payload, timestamp_millis)?;
        self.signer
            .sign_request_with_rng(&ctx, &self.cookies, Some(&self.profile), rng)
    }

    /// Replace the session device with a fresh one.
    pub fn rotate_device(&mut self) {
        self.rotate_device_with_rng(&mut rand::thread_rng());
    }

    pub fn rotate_device_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.profile = DeviceProfile::generate(rng);
        debug!(
            width = self.profile.screen.width,
            height = self.profile.screen.height,
            "rotated session device"
        );
    }

    /// Whole 30-second windows since the session started, rounded to nearest.
    ///
    /// Times before the start count as zero.
    pub fn elapsed_windows(&self, now_millis: u64) -> u64 {
        let elapsed = now_millis.saturating_sub(self.started_at_millis);
        (elapsed + WINDOW_MILLIS / 2) / WINDOW_MILLIS
    }
}
