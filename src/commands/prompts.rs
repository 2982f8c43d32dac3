use crate::models::SchemaVariant;

const BILINGUAL_PROMPT: &str = concat!(
    "You are a merchandising assistant. Analyze the product photo and respond with a JSON ",
    "object containing four fields only: ",
    "\"description_en\": a 55-70 word English paragraph describing the product shape, dominant ",
    "colors, and any cultural or symbolic meaning implied by the visuals; ",
    "\"description_th\": the same information written in fluent Thai; ",
    "\"tags_en\": an array of 6-10 short English keyword tags (no commas in individual tags); ",
    "\"tags_th\": an array of 6-10 short Thai keyword tags (no commas in individual tags). ",
    "Do not invent details that are not clearly visible."
);

const MONOLINGUAL_PROMPT: &str = concat!(
    "You are a merchandising assistant. Analyze the product photo and respond with a JSON ",
    "object containing two fields only: ",
    "\"description\": a 55-70 word English paragraph describing the product shape, dominant ",
    "colors, and any cultural or symbolic meaning implied by the visuals; ",
    "\"tags\": an array of 6-10 short English keyword tags (no commas in individual tags). ",
    "Do not invent details that are not clearly visible."
);

pub fn prompt_for(variant: SchemaVariant) -> &'static str {
    match variant {
        SchemaVariant::Bilingual => BILINGUAL_PROMPT,
        SchemaVariant::Monolingual => MONOLINGUAL_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prompt_names_its_reply_fields() {
        for variant in [SchemaVariant::Bilingual, SchemaVariant::Monolingual] {
            let prompt = prompt_for(variant);
            for slot in variant.slots() {
                assert!(prompt.contains(&format!("\"{}\"", slot.description_field)));
                assert!(prompt.contains(&format!("\"{}\"", slot.tags_field)));
            }
        }
    }
}
