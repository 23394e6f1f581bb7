use nq_core::Article;

pub const SAMPLE_QUERIES: [&str; 3] = [
    "What's new in healthcare AI?",
    "Tell me about farming and weather",
    "Latest space news",
];

pub fn sample_articles() -> Vec<Article> {
    vec![
        Article::new(
            "AI Breakthrough in Healthcare",
            "Scientists have developed a new AI model that can predict patient outcomes with 95% accuracy. The model uses deep learning to analyze medical records and identify patterns that human doctors might miss.",
            "https://example.com/ai-healthcare",
        ),
        Article::new(
            "Climate Change Impact on Agriculture",
            "A new study shows that changing weather patterns are affecting crop yields worldwide. Farmers are adapting by using drought-resistant crops and advanced irrigation systems.",
            "https://example.com/climate-agriculture",
        ),
        Article::new(
            "Space Exploration Update",
            "NASA announces plans for new Mars mission in 2026. The mission will focus on searching for signs of ancient microbial life and testing new propulsion technologies.",
            "https://example.com/space-exploration",
        ),
    ]
}
