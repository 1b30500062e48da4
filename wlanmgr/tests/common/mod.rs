//! Scripted radio driver shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use wlanmgr::{
    ConnectionManager, Credentials, IpConfig, ManagerConfig, Radio, RadioError, Result,
};

#[derive(Default)]
struct Script<T> {
    queued: VecDeque<T>,
    fallback: T,
}

impl<T: Copy> Script<T> {
    fn next(&mut self) -> T {
        self.queued.pop_front().unwrap_or(self.fallback)
    }
}

#[derive(Default)]
struct MockState {
    connected: Script<bool>,
    status: Script<i32>,
    mac: [u8; 6],
    ifconfig: Option<IpConfig>,
    fail_status: bool,
    fail_connected: bool,

    connect_calls: usize,
    disconnect_calls: usize,
    is_connected_calls: usize,
    status_calls: usize,
    active_calls: Vec<bool>,
    power_management: Vec<u32>,
    last_credentials: Option<(String, String)>,
}

/// Radio whose answers are queued up front by the test.
///
/// `is_connected` and `status` pop queued values first and fall back to a
/// fixed answer once the queue is empty, so a test can describe e.g.
/// "down twice, then up for good".
#[derive(Default)]
pub struct MockRadio {
    state: Mutex<MockState>,
}

impl MockRadio {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn connected_returns(&self, value: bool) {
        self.state.lock().unwrap().connected.fallback = value;
    }

    pub fn connected_sequence(&self, values: &[bool]) {
        self.state
            .lock()
            .unwrap()
            .connected
            .queued
            .extend(values.iter().copied());
    }

    pub fn status_returns(&self, code: i32) {
        self.state.lock().unwrap().status.fallback = code;
    }

    pub fn status_sequence(&self, codes: &[i32]) {
        self.state
            .lock()
            .unwrap()
            .status
            .queued
            .extend(codes.iter().copied());
    }

    pub fn fail_status(&self, fail: bool) {
        self.state.lock().unwrap().fail_status = fail;
    }

    pub fn fail_connected(&self, fail: bool) {
        self.state.lock().unwrap().fail_connected = fail;
    }

    pub fn set_mac(&self, mac: [u8; 6]) {
        self.state.lock().unwrap().mac = mac;
    }

    pub fn set_ifconfig(&self, cfg: IpConfig) {
        self.state.lock().unwrap().ifconfig = Some(cfg);
    }

    pub fn connect_calls(&self) -> usize {
        self.state.lock().unwrap().connect_calls
    }

    pub fn disconnect_calls(&self) -> usize {
        self.state.lock().unwrap().disconnect_calls
    }

    pub fn is_connected_calls(&self) -> usize {
        self.state.lock().unwrap().is_connected_calls
    }

    pub fn status_calls(&self) -> usize {
        self.state.lock().unwrap().status_calls
    }

    pub fn active_calls(&self) -> Vec<bool> {
        self.state.lock().unwrap().active_calls.clone()
    }

    pub fn power_management(&self) -> Vec<u32> {
        self.state.lock().unwrap().power_management.clone()
    }

    pub fn last_credentials(&self) -> Option<(String, String)> {
        self.state.lock().unwrap().last_credentials.clone()
    }
}

#[async_trait]
impl Radio for MockRadio {
    async fn set_active(&self, active: bool) -> Result<()> {
        self.state.lock().unwrap().active_calls.push(active);
        Ok(())
    }

    async fn is_connected(&self) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.is_connected_calls += 1;
        if state.fail_connected {
            return Err(RadioError::new("is_connected", "driver not responding").into());
        }
        Ok(state.connected.next())
    }

    async fn connect(&self, ssid: &str, password: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.connect_calls += 1;
        state.last_credentials = Some((ssid.to_string(), password.to_string()));
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.state.lock().unwrap().disconnect_calls += 1;
        Ok(())
    }

    async fn status(&self) -> Result<i32> {
        let mut state = self.state.lock().unwrap();
        state.status_calls += 1;
        if state.fail_status {
            return Err(RadioError::new("status", "driver not responding").into());
        }
        Ok(state.status.next())
    }

    async fn set_power_management(&self, mode: u32) -> Result<()> {
        self.state.lock().unwrap().power_management.push(mode);
        Ok(())
    }

    async fn mac_address(&self) -> Result<[u8; 6]> {
        Ok(self.state.lock().unwrap().mac)
    }

    async fn ifconfig(&self) -> Result<IpConfig> {
        self.state
            .lock()
            .unwrap()
            .ifconfig
            .ok_or_else(|| RadioError::new("ifconfig", "no address assigned").into())
    }
}

pub fn sample_ifconfig() -> IpConfig {
    IpConfig {
        address: Ipv4Addr::new(192, 168, 1, 123),
        netmask: Ipv4Addr::new(255, 255, 255, 0),
        gateway: Ipv4Addr::new(192, 168, 1, 1),
        dns: Ipv4Addr::new(192, 168, 1, 1),
    }
}

/// Manager over a fresh mock with `timeout` ticks and `retries` attempts.
pub fn harness(timeout: u32, retries: u32) -> (ConnectionManager<MockRadio>, Arc<MockRadio>) {
    let radio = MockRadio::new();
    let config = ManagerConfig::new()
        .with_timeout_secs(timeout)
        .with_retry_count(retries);
    let manager = ConnectionManager::new(
        Arc::clone(&radio),
        Credentials::new("ssid", "pass").unwrap(),
        config,
    )
    .unwrap();
    (manager, radio)
}

/// Manager with the default 30 tick / 3 attempt policy.
pub fn default_harness() -> (ConnectionManager<MockRadio>, Arc<MockRadio>) {
    harness(30, 3)
}
