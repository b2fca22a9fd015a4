use serde_json::{json, Value};

pub const ANALYSIS_PROMPT: &str = "
Você é um cabeleireiro especialista e analista facial. Sua tarefa é analisar as duas imagens fornecidas de uma pessoa (uma frontal, uma de perfil) e fornecer uma análise facial detalhada e recomendações de cortes de cabelo personalizados. Sua resposta deve estar no formato JSON.

Analise os seguintes aspectos com base nas imagens:
1.  **faceShape**: Determine o formato do rosto (ex: 'Oval', 'Quadrado', 'Redondo', 'Coração', 'Diamante').
2.  **facialProportions**: Descreva brevemente as principais proporções, como a largura da testa versus a linha da mandíbula.
3.  **jawline**: Descreva o ângulo da mandíbula (ex: 'Definida', 'Suave').
4.  **forehead**: Descreva o formato da testa (ex: 'Larga', 'Estreita').
5.  **sideProfile**: Analise o perfil lateral, observando a projeção do queixo, a curvatura do crânio e a linha do cabelo.
6.  **hairType**: Infira o tipo de cabelo (ex: 'Ondulado', 'Liso', 'Cacheado'), textura ('Fino', 'Médio', 'Grosso'), e densidade ('Baixa', 'Média', 'Alta').
7.  **skinTone**: Descreva o tom de pele (ex: 'Claro', 'Médio', 'Escuro') e o subtom, se possível ('Quente', 'Frio', 'Neutro').

Com base nesta análise, forneça 3 recomendações de cortes de cabelo. Para cada recomendação:
-   **name**: Um nome claro para o corte (ex: 'Bob Assimétrico', 'Undercut Texturizado', 'Corte Longo em Camadas').
-   **lengths**: Um array de comprimentos possíveis (ex: ['Curto', 'Médio']).
-   **description**: Uma breve descrição do corte.
-   **reason**: Uma explicação simples do *porquê* este corte é uma boa combinação para as características do usuário.
-   **styling**: Breves dicas sobre como estilizar este corte.

Forneça sua saída final como um único objeto JSON. Não inclua nenhum texto antes ou depois do bloco JSON.
";

pub const ANALYSIS_FIELDS: [&str; 7] = [
    "faceShape",
    "facialProportions",
    "jawline",
    "forehead",
    "sideProfile",
    "hairType",
    "skinTone",
];

pub const RECOMMENDATION_FIELDS: [&str; 5] = ["name", "lengths", "description", "reason", "styling"];

fn string_property(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

/// Response constraint sent as `generationConfig.responseSchema`.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysis": {
                "type": "OBJECT",
                "properties": {
                    "faceShape": string_property("Formato do rosto"),
                    "facialProportions": string_property("Proporções faciais"),
                    "jawline": string_property("Linha da mandíbula"),
                    "forehead": string_property("Formato da testa"),
                    "sideProfile": string_property("Análise do perfil"),
                    "hairType": string_property("Tipo de cabelo"),
                    "skinTone": string_property("Tom de pele"),
                },
                "required": ANALYSIS_FIELDS,
            },
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string_property("Nome do corte"),
                        "lengths": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "Comprimentos possíveis",
                        },
                        "description": string_property("Descrição do corte"),
                        "reason": string_property("Motivo da recomendação"),
                        "styling": string_property("Dicas de estilização"),
                    },
                    "required": RECOMMENDATION_FIELDS,
                },
            },
        },
        "required": ["analysis", "recommendations"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_every_analysis_and_recommendation_field() {
        let schema = response_schema();
        let analysis = &schema["properties"]["analysis"];
        for field in ANALYSIS_FIELDS {
            assert_eq!(analysis["properties"][field]["type"], "STRING", "{field}");
        }
        assert_eq!(analysis["required"].as_array().map(Vec::len), Some(7));

        let item = &schema["properties"]["recommendations"]["items"];
        assert_eq!(item["properties"]["lengths"]["items"]["type"], "STRING");
        assert_eq!(item["required"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn prompt_names_every_requested_field() {
        for field in ANALYSIS_FIELDS.iter().chain(RECOMMENDATION_FIELDS.iter()) {
            assert!(ANALYSIS_PROMPT.contains(&format!("**{field}**")), "{field}");
        }
    }
}
