fn main() -> Result<(), Box<dyn std::error::Error>> {
    wifi_provision::provision_build_script()?;
    Ok(())
}
