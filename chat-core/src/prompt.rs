//! Prompt construction for the generation stage.
//!
//! System instructions vary with the context kind: confident FAQ hits get a
//! strict answer-from-FAQ instruction, mixed contexts prefer FAQ passages
//! over documents, and plain document contexts get the generic grounded
//! instruction.

use crate::types::ContextKind;

/// Separator placed between context passages.
pub const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// System instruction appropriate for the given context mix.
pub fn system_instruction(kind: ContextKind) -> &'static str {
    match kind {
        ContextKind::FaqOnly => {
            "You are an FAQ assistant.\n\
             STRICT RULES:\n\
             1. Answer ONLY from the provided FAQ entries.\n\
             2. When the question matches an FAQ, use that FAQ's answer verbatim where possible.\n\
             3. Do not merge multiple FAQ entries unless necessary.\n\
             4. Do not invent information or use outside knowledge.\n\
             5. Be concise and direct.\n\
             6. If no FAQ entry answers the question, say you could not find it in the FAQ."
        }
        ContextKind::FaqAndDocs => {
            "You are an assistant with FAQ entries and supporting documents.\n\
             RULES:\n\
             1. Prefer the FAQ entries whenever they answer the question.\n\
             2. Use the documents only when the FAQ entries are not enough.\n\
             3. Do not invent information.\n\
             4. Be concise and precise."
        }
        ContextKind::DocsOnly => {
            "You are a helpful assistant that answers ONLY from the provided context.\n\
             If the information is not in the context, state clearly that you do not have it.\n\
             Do not invent information or use knowledge outside the context."
        }
    }
}

/// User prompt combining the context passages and the question.
pub fn build_user_prompt(kind: ContextKind, passages: &[String], query: &str) -> String {
    let context = passages.join(PASSAGE_SEPARATOR);
    match kind {
        ContextKind::FaqOnly => format!(
            "Available FAQ entries:\n\n{context}\n\nUser question:\n{query}\n\n\
             Instruction: answer only if the question matches one of the FAQ entries above."
        ),
        ContextKind::FaqAndDocs => format!(
            "Available context (FAQ entries first, then documents):\n\n{context}\n\n\
             User question:\n{query}\n\n\
             Instruction: prioritize the FAQ information when available."
        ),
        ContextKind::DocsOnly => format!(
            "Use ONLY this context information to answer:\n\n{context}\n\nUser question:\n{query}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passages_are_joined_with_separator() {
        let passages = vec!["first".to_string(), "second".to_string()];
        let p = build_user_prompt(ContextKind::DocsOnly, &passages, "q?");
        assert!(p.contains("first\n\n---\n\nsecond"));
        assert!(p.ends_with("q?"));
    }

    #[test]
    fn instructions_differ_per_kind() {
        let a = system_instruction(ContextKind::FaqOnly);
        let b = system_instruction(ContextKind::FaqAndDocs);
        let c = system_instruction(ContextKind::DocsOnly);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }
}
