// All prompt constants for the three analysis tasks.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Persona for celebrity matching.
pub const MATCH_PERSONA: &str =
    "You are an AI that finds the Korean celebrity who most resembles the person in a photo.";

/// Celebrity matching prompt template.
/// Replace: {birth_date}, {birth_time}, {birth_location}, {sentinel},
///          {not_found_message}, {placeholder_photo_url}, {korean_instruction}
/// The user's photo is attached as an inline image part.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Based on the attached user photo and their birth information, find the Korean celebrity who looks the most similar to the user.
Also consider the user's astrological data (birth date, time, and location) to find similarities in their fortune patterns.

Birth Date: {birth_date}
Birth Time: {birth_time}
Birth Location: {birth_location}

Your task is to:
1. Identify the Korean celebrity that most closely resembles the person in the photo.
2. Calculate a match percentage (integer 0-100) based on visual and astrological similarities.
3. Describe the similarities in their fortune patterns.
4. Find a high-quality, publicly available photo URL (https) for the matched celebrity.

Return a JSON object with this EXACT schema (no extra fields):
{
  "celebrityMatch": "아이유",
  "matchPercentage": 87,
  "fortuneSimilarity": "두 분 모두 봄의 기운을 타고나 ...",
  "celebrityPhotoUrl": "https://example.com/celebrity.jpg"
}

If no face can be recognised in the photo, or for any reason you absolutely cannot find a match, return:
{
  "celebrityMatch": "{sentinel}",
  "matchPercentage": 0,
  "fortuneSimilarity": "{not_found_message}",
  "celebrityPhotoUrl": "{placeholder_photo_url}"
}

{korean_instruction}"#;

/// Persona for chart data and narrative generation.
pub const VISUALIZATION_PERSONA: &str = "You are an expert astrologer and storyteller.";

/// Visualization prompt template.
/// Replace: {birth_date}, {birth_time}, {birth_location}, {celebrity_line},
///          {narrative_instruction}, {korean_instruction}
pub const VISUALIZATION_PROMPT_TEMPLATE: &str = r#"Given the astrological data of a user, generate chart data, a career persona, and a destiny interpretation.

User Birth Date: {birth_date}
User Birth Time: {birth_time}
User Birth Location: {birth_location}
{celebrity_line}

Instructions:
1. fortuneCurve: data points visualizing the user's fortune trend over the next 12 months (label each point with the month, e.g. "1월").
2. wealthIndex: 5-7 data points on different financial aspects.
3. affectionIndex: 5-7 data points on different relationship aspects.
4. healthIndex: 5-7 data points on different well-being aspects.
5. careerPersona: a suitable career persona (e.g. 배우, 음악가, 운동선수) based on the user's astrological data.
6. interpretation: {narrative_instruction}

All values are numbers between 0 and 100.

Return a JSON object with this EXACT schema (no extra fields):
{
  "fortuneCurve": [{"label": "1월", "value": 72}],
  "wealthIndex": [{"label": "저축운", "value": 64}],
  "affectionIndex": [{"label": "연애운", "value": 81}],
  "healthIndex": [{"label": "활력", "value": 58}],
  "careerPersona": "배우",
  "interpretation": "..."
}

{korean_instruction}"#;

/// Line naming the matched celebrity in the visualization prompt.
/// Replace: {matched_celebrity}
pub const CELEBRITY_LINE: &str = "Matched Celebrity: {matched_celebrity}";

/// Narrative instruction when a celebrity was matched.
/// Replace: {matched_celebrity}
pub const CELEBRITY_NARRATIVE_INSTRUCTION: &str = "Create a compelling narrative that highlights \
    the user's potential and destiny, drawing parallels to the matched celebrity's achievements. \
    For example: \"{matched_celebrity}님과 비슷한 별자리를 가진 당신은, 분야에서 선구자가 될 잠재력을 가지고 있습니다. \
    만약 같은 시대에 데뷔했다면, {matched_celebrity}님처럼 빛났을 것입니다.\" \
    The interpretation should be engaging and insightful.";

/// Narrative instruction when no celebrity is available. Must not reference one.
pub const GENERIC_NARRATIVE_INSTRUCTION: &str = "Create a compelling narrative that highlights \
    the user's potential and destiny based only on their own astrological data. \
    Do NOT mention, compare with, or invent any celebrity. \
    For example: \"당신은 타고난 별의 기운 덕분에 자신의 분야에서 선구자가 될 잠재력을 가지고 있습니다.\" \
    The interpretation should be engaging and insightful.";

/// Persona for the personality and success analysis.
pub const PERSONALITY_PERSONA: &str =
    "You are a sophisticated AI that performs machine-learning-style analysis to predict personality and success.";

/// Personality prompt template.
/// Replace: {birth_date}, {trait_names}, {korean_instruction}
/// The user's photo is attached as an inline image part.
pub const PERSONALITY_PROMPT_TEMPLATE: &str = r#"Based on the attached user photo and birth date, perform a detailed analysis.

Birth Date: {birth_date}

Your tasks are to:
1. Analyze Personality Traits: based on the photo, analyze the user's personality according to the Big Five model (Openness, Conscientiousness, Extraversion, Agreeableness, Neuroticism). Provide a score from 0-100 for each of the 5 traits and a brief, insightful description for each. Use exactly these Korean trait names, each exactly once: {trait_names}.
2. Predict Success Path: based on the personality analysis and the user's birth date (interpreted in a numerological or life-path context), give a compelling and encouraging prediction about their potential path to success.

Return a JSON object with this EXACT schema (no extra fields):
{
  "personalityAnalysis": [
    {"trait": "개방성", "score": 78, "description": "..."}
  ],
  "successPrediction": "..."
}

"personalityAnalysis" MUST contain exactly 5 entries.

{korean_instruction}"#;
