//! Reads the credentials provisioned by `build.rs`. An integration dump
//! provisions nothing, so the values are optional here.

pub const WIFI_SSID: Option<&str> = option_env!("EXAMPLE_WIFI_SSID");
pub const WIFI_PASS: Option<&str> = option_env!("EXAMPLE_WIFI_PASSWORD");

fn main() {
    match (WIFI_SSID, WIFI_PASS) {
        (Some(ssid), Some(pass)) => {
            println!("would connect to '{ssid}' with a {}-byte password", pass.len())
        }
        _ => println!("built without WiFi credentials"),
    }
}
