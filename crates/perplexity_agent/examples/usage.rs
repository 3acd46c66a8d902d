//! Example usage of the chat client
//!
//! Reads the API key from `PERPLEXITY_API_KEY` (a `.env` file in the working
//! directory is honoured).
//!
//!     cargo run -p perplexity_agent --example usage

use perplexity_agent::{load_dotenv, ChatClient, ChatOptions, ClientConfig, Message};

fn print_section(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv()?;
    let client = ChatClient::new(ClientConfig::from_env(None)?)?;
    let defaults = ChatOptions::default();

    print_section("Example 1: Simple question");
    let question = "What is the capital of France?";
    let answer = client.ask(question, &defaults).await?;
    println!("Question: {}", question);
    println!("Answer: {}\n", answer);

    print_section("Example 2: Get full response");
    let question = "Explain quantum computing in simple terms";
    let full = client.ask_full(question, &defaults).await?;
    println!("Question: {}", question);
    if let Some(obj) = full.as_value().as_object() {
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        println!("Full Response Keys: {:?}", keys);
    }
    if let Some(answer) = full.answer() {
        println!("Answer: {}\n", answer);
    }

    print_section("Example 3: Custom chat with multiple messages");
    let messages = vec![
        Message::user("What is Python?"),
        Message::assistant("Python is a high-level programming language known for its simplicity."),
        Message::user("What are its main features?"),
    ];
    let response = client.send(&messages, &defaults).await?;
    if let Some(answer) = response.answer() {
        println!("Answer: {}\n", answer);
    }

    print_section("Example 4: Custom parameters");
    let question = "Write a short poem about AI";
    let options = ChatOptions::new()
        .with_temperature(0.7)
        .with_max_tokens(200);
    let answer = client.ask(question, &options).await?;
    println!("Question: {}", question);
    println!("Answer: {}\n", answer);

    Ok(())
}
