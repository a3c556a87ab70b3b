//! Send command - fires one message at a running relay.

use postbox::{Config, Message, relay::RelaySender};

use crate::cli::SendArgs;

/// Run the send command
pub async fn run(config: &Config, args: &SendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let sender = RelaySender::bind(config.relay_addr()).await?;
    let message = Message::new(args.username.clone(), args.message.clone());
    let sent = sender.send(&message).await?;

    // Nothing comes back over UDP, so this only says the datagram left.
    println!("Sent {sent} bytes to udp://{}", sender.relay_addr());
    Ok(())
}
