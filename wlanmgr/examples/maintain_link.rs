/// Example keeping a simulated link alive across drops.
///
/// The in-memory radio below comes up a couple of seconds after each
/// connect and drops the link every few seconds, so the maintenance loop
/// and the notification signals can be watched without hardware.
///
/// The manager is verbose, so its diagnostics are logged at `info`. Install
/// a `log` backend (e.g. `env_logger`) in `main` to see them; without one
/// only the `println!` output appears.
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use wlanmgr::types::constants::link_status;
use wlanmgr::{ConnectionManager, Credentials, IpConfig, ManagerConfig, Radio};

/// Radio that needs `join_polls` status polls to come up and loses the link
/// after `drop_after` polls of being connected.
struct FlakyRadio {
    up: AtomicBool,
    polls: AtomicU32,
    join_polls: u32,
    drop_after: u32,
}

#[async_trait]
impl Radio for FlakyRadio {
    async fn set_active(&self, active: bool) -> wlanmgr::Result<()> {
        println!("  [radio] active = {active}");
        Ok(())
    }

    async fn is_connected(&self) -> wlanmgr::Result<bool> {
        let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.up.load(Ordering::SeqCst) {
            if polls >= self.drop_after {
                println!("  [radio] link lost");
                self.up.store(false, Ordering::SeqCst);
            }
        } else if polls >= self.join_polls {
            self.up.store(true, Ordering::SeqCst);
            self.polls.store(0, Ordering::SeqCst);
        }
        Ok(self.up.load(Ordering::SeqCst))
    }

    async fn connect(&self, ssid: &str, _password: &str) -> wlanmgr::Result<()> {
        println!("  [radio] joining '{ssid}'");
        self.polls.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> wlanmgr::Result<()> {
        self.up.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn status(&self) -> wlanmgr::Result<i32> {
        Ok(link_status::CONNECTING)
    }

    async fn set_power_management(&self, mode: u32) -> wlanmgr::Result<()> {
        println!("  [radio] power management = {mode:#x}");
        Ok(())
    }

    async fn mac_address(&self) -> wlanmgr::Result<[u8; 6]> {
        Ok([0x28, 0xcd, 0xc1, 0x0a, 0x4b, 0x7e])
    }

    async fn ifconfig(&self) -> wlanmgr::Result<IpConfig> {
        Ok(IpConfig {
            address: Ipv4Addr::new(192, 168, 1, 42),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(192, 168, 1, 1),
            dns: Ipv4Addr::new(192, 168, 1, 1),
        })
    }
}

#[tokio::main]
async fn main() -> wlanmgr::Result<()> {
    let radio = Arc::new(FlakyRadio {
        up: AtomicBool::new(false),
        polls: AtomicU32::new(0),
        join_polls: 2,
        drop_after: 4,
    });

    let manager = ConnectionManager::new(
        radio,
        Credentials::new(
            "MyNetwork",
            std::env::var("WIFI_PASSWORD").unwrap_or_else(|_| "password".to_string()),
        )?,
        ManagerConfig::new().with_timeout_secs(10).with_verbose(true),
    )?;

    println!("Connecting...");
    manager.connect().await?;
    println!(
        "Connected: MAC {} / IP {}",
        manager.get_mac_address().await?,
        manager.get_ip_address().await?
    );

    let mut drops = manager.on_disconnected().subscribe();
    let mut ups = manager.on_connected().subscribe();

    for _ in 0..2 {
        drops.next().await;
        println!("Link dropped, state: {}", manager.state());
        ups.next().await;
        println!("Link restored, state: {}", manager.state());
    }

    tokio::time::sleep(Duration::from_secs(1)).await;
    manager.disconnect().await?;
    println!("Disconnected, state: {}", manager.state());

    Ok(())
}
