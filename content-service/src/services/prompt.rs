//! Prompt construction for post generation.

use crate::models::{ContentSize, Platform};

/// Tone used for platforms without a dedicated guideline.
pub const GENERIC_PLATFORM_GUIDELINE: &str = "General social media style";

/// Length guideline for a size variant.
pub fn size_guideline(size: ContentSize) -> &'static str {
    match size {
        ContentSize::Small => "Keep it concise, under 100 words, perfect for quick engagement",
        ContentSize::Medium => "Medium length, 100-200 words, balanced detail and engagement",
        ContentSize::Long => "Detailed content, 200+ words, comprehensive and in-depth",
    }
}

/// Tone guideline for a platform.
pub fn platform_guideline(platform: &Platform) -> &'static str {
    match platform {
        Platform::Linkedin => "Professional tone, business-focused, thought leadership style",
        Platform::X => "Conversational, punchy, hashtag-friendly, Twitter/X optimized",
        Platform::Other(_) => GENERIC_PLATFORM_GUIDELINE,
    }
}

/// Build the instruction sent to the model for one size variant.
pub fn build_prompt(
    idea: &str,
    target_audience: &str,
    platform: &Platform,
    post_category: &str,
    size: ContentSize,
) -> String {
    format!(
        "Create a {size} {platform} post about: {idea}\n\
         \n\
         Target Audience: {target_audience}\n\
         Category: {post_category}\n\
         \n\
         Platform Guidelines: {tone}\n\
         Size Guidelines: {length}\n\
         \n\
         Make it engaging, relevant to the target audience, and optimized for {platform}.\n\
         Return only the post content, no additional formatting or explanations.",
        size = size,
        platform = platform,
        idea = idea,
        target_audience = target_audience,
        post_category = post_category,
        tone = platform_guideline(platform),
        length = size_guideline(size),
    )
}
