use crate::models::{Category, FaqEntry};

// API constants
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Category name used in the model context when a FAQ points at a category
/// that no longer exists.
pub const UNRESOLVED_CATEGORY: &str = "Geral";

/// Category label used in listings for the same situation.
pub const UNRESOLVED_CATEGORY_LABEL: &str = "N/A";

/// Returned by the fallback matcher when nothing in the knowledge base hits.
pub const NO_MATCH_RESPONSE: &str = "Desculpe, não encontrei informações específicas sobre isso na base de conhecimento. Por favor, contacte a secretaria da UCM-FEG Beira para mais informações.";

/// Prefix prepended to the fallback answer when the AI service call fails.
pub const DEGRADED_MODE_PREFIX: &str = "Ocorreu um erro ao conectar com o serviço de IA. Por favor, tente novamente mais tarde. A usar o modo de fallback: ";

/// Query used to produce the opening greeting when the chat screen loads.
pub const GREETING_QUERY: &str = "Olá";

/// Persona and formatting rules for the model. The knowledge-base context is
/// appended between the `---` markers by the resolver.
pub const PERSONA_HEADER: &str = r#"Você é um assistente virtual da Universidade Católica de Moçambique - Faculdade de Economia e Gestão (UCM-FEG) em Beira. Seu nome é Gito.

Sua função é ajudar estudantes e interessados com informações sobre:
- Matrículas e inscrições
- Propinas (valores, prazos, formas de pagamento)
- Calendário acadêmico
- Emissão de documentos e certificados
- Acesso ao e-Learning, portal do estudante e bibliotecas
- Secretaria (horários e contatos)

INSTRUÇÕES IMPORTANTES:
1. Seja sempre cordial, profissional e prestativo. Apresente-se como Gito na primeira mensagem.
2. Responda em português de Moçambique.
3. Use as informações da base de conhecimento abaixo como sua fonte primária e única de verdade. Responda APENAS com base nessas informações.
4. Se a informação não estiver na base de conhecimento, NÃO INVENTE. Responda de forma educada que não tem essa informação e sugira que o estudante contacte a secretaria da UCM-FEG para mais detalhes.
5. Mantenha respostas concisas mas completas.
6. Use formatação clara, como listas com bullets (*) ou parágrafos curtos, para facilitar a leitura.
7. Não mencione que você está a usar uma "base de conhecimento". Aja como se soubesse as informações naturalmente.

BASE DE CONHECIMENTO (FAQs):
---
"#;

pub const PERSONA_FOOTER: &str = "\n---\n";

/// Categories shipped with the application. Static for the session: there is
/// no category CRUD surface.
pub fn seed_categories() -> Vec<Category> {
    vec![
        Category::new("1", "Matrículas e Inscrições", "Informações sobre o processo de matrículas e inscrições."),
        Category::new("2", "Propinas e Pagamentos", "Valores, prazos e métodos de pagamento de propinas."),
        Category::new("3", "Calendário Académico", "Datas importantes, feriados e eventos do ano letivo."),
        Category::new("4", "Documentos e Certificados", "Como solicitar declarações, certificados e outros documentos."),
        Category::new("5", "Acesso a Sistemas", "Ajuda com o portal do estudante, e-Learning e outras plataformas."),
    ]
}

/// Initial knowledge base contents.
pub fn seed_faqs() -> Vec<FaqEntry> {
    vec![
        FaqEntry::seeded(
            "1",
            "1",
            "Quais são os prazos para matrículas e inscrições?",
            "Os prazos para matrículas e inscrições são normalmente anunciados no início do ano letivo, em Janeiro. Por favor, consulte o calendário acadêmico oficial no site da universidade ou no painel de avisos da secretaria para as datas exatas.",
            152,
        ),
        FaqEntry::seeded(
            "2",
            "2",
            "Quais são os valores das propinas e como posso pagar?",
            "Os valores das propinas variam por curso. Você pode encontrar a tabela de preços na secretaria ou no portal do estudante. O pagamento pode ser feito via transferência bancária para a conta da UCM (disponível na tesouraria), depósito ou diretamente na tesouraria da faculdade.",
            231,
        ),
        FaqEntry::seeded(
            "3",
            "3",
            "Onde posso encontrar o calendário acadêmico?",
            "O calendário acadêmico está disponível no site oficial da UCM-FEG, no portal do estudante e afixado nos murais de informação da faculdade. Ele contém todas as datas importantes, como início e fim das aulas, exames e feriados.",
            98,
        ),
        FaqEntry::seeded(
            "4",
            "4",
            "Como faço para solicitar uma declaração ou certificado?",
            "Para solicitar qualquer documento oficial, você deve preencher um requerimento na secretaria acadêmica. O prazo de emissão e as taxas associadas podem ser consultadas no mesmo local. O tempo de espera normal é de 3-5 dias úteis.",
            189,
        ),
        FaqEntry::seeded(
            "5",
            "5",
            "Como acesso a plataforma de e-Learning?",
            "O acesso à plataforma de e-Learning é feito através do link fornecido no site da universidade, utilizando seu número de estudante como nome de usuário e a senha definida no momento da matrícula. Se tiver problemas de acesso, contate o suporte técnico através do email suporte.feg@ucm.ac.mz.",
            112,
        ),
        FaqEntry::seeded(
            "6",
            "2",
            "Posso pagar as propinas em prestações?",
            "Sim, a UCM-FEG oferece planos de pagamento em prestações. Para mais detalhes sobre as modalidades e para aderir a um plano, por favor, dirija-se à tesouraria da faculdade.",
            76,
        ),
        FaqEntry::seeded(
            "7",
            "1",
            "Quais documentos são necessários para a matrícula?",
            "Para a matrícula de novos ingressos, são necessários: cópia do BI, certificado de habilitações, 2 fotos tipo passe, e o comprovativo de pagamento da taxa de matrícula. Para estudantes antigos, apenas o comprovativo de pagamento é necessário.",
            205,
        ),
    ]
}
