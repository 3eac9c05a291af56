//! Run this example with `OPENAI_API_KEY=` (and optionally `OPENAI_BASE_URL=`).
//! Set `RUST_LOG=openai_client=debug` to see the requests go out.

use openai_client::{
    endpoints::chat::{ChatCompletion, Model},
    user_message, Configuration, OpenAI, OpenAIApi,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = OpenAI::client(&Configuration::from_env()?)?;

    let request = ChatCompletion::model(Model::Gpt4oMini)
        .messages(vec![user_message!(
            "Explain to me how LLMs work in a short and succinct way"
        )])
        .build();

    let response = client.create_chat_completion(&request).await?;

    println!("Model used: {}", response.model());
    if let Some(usage) = response.usage() {
        println!("Total tokens: {}", usage.total_tokens);
        println!("Prompt tokens: {}", usage.prompt_tokens);
        println!("Completion tokens: {}", usage.completion_tokens);
    }

    let content = response.first_choice()?.message()?;
    println!("Assistant's response: {content}");

    Ok(())
}
