use super::device_code::DeviceAuthorization;

/// Display collaborator for the device-authorization flow.
///
/// Called exactly once per attempt, before polling begins. Implementations
/// present the verification URI and user code to a human (terminal print,
/// browser launch, QR code) and must not block.
pub trait VerificationPrompt: Send + Sync {
    fn show(&self, grant: &DeviceAuthorization);
}

/// Terminal prompt that prints the verification URI and user code to stdout.
///
/// Prefers `verification_uri_complete` (code embedded in the URL) when the
/// provider supplies one, and always shows the manual-entry fallback.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl VerificationPrompt for TerminalPrompt {
    fn show(&self, grant: &DeviceAuthorization) {
        println!("🔐 Authentication required");
        match &grant.verification_uri_complete {
            Some(complete) => {
                println!("🔗 Open this URL in your browser: {complete}");
                println!("   Or visit {} and enter code: {}", grant.verification_uri, grant.user_code);
            }
            None => {
                println!("🔗 Visit: {}", grant.verification_uri);
                println!("📋 Enter code: {}", grant.user_code);
            }
        }
        println!("⏳ Waiting for authorization...");
    }
}
