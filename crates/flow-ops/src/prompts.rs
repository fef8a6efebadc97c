//! Textos de prompt del producto.

/// Descripción de la prenda al subirla. La respuesta es JSON con
/// `description`, `productCategory` y `hasHuman`.
pub const DESCRIBE_GARMENT: &str = "Describe product on the photo, detect product category (e.g t-shirt, jeans, shirt, etc.) and detect if there is a human on photo. Return response in JSON format:
{
   description: string,
   productCategory: string,
   hasHuman: boolean
}

Description should contain maximum 5 words and contain only valuable information without redundant articles and words.";

/// Propuesta de prompt para Linda a partir de la foto de la prenda.
pub const LINDA_PROMPT_INSTRUCTIONS: &str = "Propose prompt to generate attractive photo of the item on model for e-commerce product card.
- Keep only valuable information without redundant articles and words.
- Add some details describing the model (face, hair, skin, pose)
- List other clothes on model
- Include key words: ultra realistic, high resolution.
- Include type of the photo most suitable for item type: full-body, half-body, close-up
- Specify background. It can be studio or description of lifestyle scene

Return it in JSON format like { prompt }";

/// Prompt del inpaint de refinado final.
pub const REFINE_PHOTO: &str = "Ultra-realistic, high-resolution photograph of a model, sharp focus, professional DSLR quality, cinematic colors, depth of field, no blur, 4K, 8K, hyper-realistic, natural skin texture, photorealistic details, well-lit, fashion editorial style.";
