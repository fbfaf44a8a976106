//! Canned data: the offline critique returned when no API key is set,
//! and the sample essays offered from the editor.

use crate::schema::*;

pub struct SampleEssay {
    pub title: &'static str,
    pub text: &'static str,
}

pub const SAMPLE_ESSAYS: &[SampleEssay] = &[
    SampleEssay {
        title: "Industrial Revolution (B-Grade)",
        text: "The industrial revolution was a pivotal moment in history. It changed society in many ways. For many people, life became very different. Factories were built, and cities grew larger as people moved to find work. This had both good and bad effects.\nOne of the main effects was economic. New technologies allowed for mass production, which made goods cheaper. This created wealth for some, but it also led to poor working conditions for many others. People worked long hours in dangerous factories. This is something that is often criticized.\nSocially, the structure of families and communities was altered. The traditional rural way of life declined. In its place, new urban communities emerged, but these were often overcrowded and lacked sanitation. This led to the spread of disease. It's clear that the changes were profound.\nIn conclusion, while the industrial revolution brought about technological progress and economic growth, its social cost was significant. The period was complex, and its legacy is still debated by historians today. It definitely was a very important time.",
    },
    SampleEssay {
        title: "The Great Gatsby (A-Grade)",
        text: "F. Scott Fitzgerald's \"The Great Gatsby\" is not merely a story of unrequited love; it is a profound critique of the American Dream, revealing its inherent corruption and the hollowness at its core. Through the contrasting landscapes of West Egg, East Egg, and the Valley of Ashes, Fitzgerald constructs a moral geography where wealth is divorced from merit and happiness remains perpetually out of reach. Jay Gatsby, the novel's enigmatic protagonist, embodies the tragic paradox of the American Dream: he achieves immense wealth through illicit means in pursuit of an idealized past, only to find his dream disintegrates upon contact with reality.\nThe novel's symbolic structure is central to its critique. The green light at the end of Daisy's dock represents the unattainable future, the \"orgastic future that year by year recedes before us.\" Gatsby's lavish parties, filled with anonymous guests, symbolize the superficiality and moral decay of the Jazz Age, a society obsessed with spectacle over substance. Furthermore, the eyes of Doctor T. J. Eckleburg, brooding over the Valley of Ashes, serve as a judgment from a god-like figure on the moral wasteland created by the relentless pursuit of wealth.\nUltimately, Gatsby's downfall illustrates the impossibility of recapturing the past and the destructive nature of an ideal built on illusion. Nick Carraway's closing reflection on being \"borne back ceaselessly into the past\" suggests a cynical view of progress, implying that the American Dream is a beautiful but destructive lie. Fitzgerald masterfully uses character, setting, and symbol to expose the dark underbelly of a supposedly meritocratic society, leaving the reader to question the very foundations of American identity.",
    },
    SampleEssay {
        title: "Climate Change (Needs work)",
        text: "Climate change is a big problem. The earth is getting hotter. This is because of greenhouse gases from cars and factories. Ice caps are melting and sea levels are rising. This will cause floods. We need to do something about it. People should use less energy. Governments should make laws. For example, they can support solar power. If we dont act now it will be too late. The future of our planet is at risk. Its everyones responsibility.",
    },
];

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The full critique returned in keyless mode. It reviews the Industrial
/// Revolution sample essay, so the dashboard demo reads coherently.
pub fn sample_response() -> AnalysisResponse {
    AnalysisResponse {
        meta: Meta {
            reading_time_minutes: 1.0,
            estimated_grade_band: GradeBand::B,
            confidence: 0.85,
            ultra_mode_used: false,
        },
        scores: Scores {
            thesis: 6,
            argumentation: 5,
            evidence: 4,
            organization: 7,
            style_and_voice: 5,
            mechanics: 8,
            citation_integrity: 0,
            originality_risk: 2,
        },
        macro_feedback: MacroFeedback {
            thesis_quality: ThesisQuality {
                diagnosis: "The thesis is present but overly broad and lacks a specific, arguable claim.".into(),
                why_it_matters: "A strong thesis must be a debatable assertion that guides the entire essay.".into(),
                fix: "Narrow the focus. What specific aspect of the industrial revolution's impact will you argue?".into(),
                exemplar_rewrite: "While the Industrial Revolution spurred economic growth through technological innovation, its true legacy is defined by the profound and often detrimental social restructuring it forced upon urban working-class communities.".into(),
            },
            argument_structure: ArgumentStructure {
                diagnosis: "The essay follows a simple 'good vs. bad' structure which is functional but lacks analytical depth.".into(),
                outline_current: strs(&[
                    "Intro",
                    "Economic Effects (Good/Bad)",
                    "Social Effects (Bad)",
                    "Conclusion",
                ]),
                outline_improved: strs(&[
                    "Intro with new thesis",
                    "The Myth of Universal Progress: Deconstructing 'cheaper goods'",
                    "The Reality of Labor: From Artisan to Factory Worker",
                    "The Social Cost: Public Health and Community Fragmentation",
                    "Conclusion: Re-evaluating the 'Revolution'",
                ]),
            },
            thematic_depth: ThematicDepth {
                diagnosis: "Analysis remains at a surface level, stating commonly known facts without deeper interpretation.".into(),
                missed_angles: strs(&[
                    "The role of women and children in the workforce.",
                    "Resistance movements and early labor unions.",
                    "Environmental impact of industrialization.",
                ]),
                how_to_deepen: strs(&[
                    "Incorporate a primary source, like a worker's diary or a political cartoon, to ground your analysis.",
                    "Connect the historical events to a modern-day parallel.",
                ]),
            },
            evidence_use: EvidenceUse {
                gaps: strs(&[
                    "No specific data, dates, or historical figures are mentioned.",
                    "Claims like 'poor working conditions' need specific examples.",
                ]),
                irrelevancies: strs(&["The essay is fairly focused, with no major irrelevancies."]),
                integration_tips: strs(&[
                    "Introduce evidence with context. Instead of 'Factories were dangerous,' try 'According to historian John Doe, textile factories in Manchester reported...'",
                ]),
                signal_phrases_examples: strs(&[
                    "'This is evidenced by...'",
                    "'A key example of this can be seen in...'",
                    "'Historian Jane Smith argues that...'",
                ]),
            },
            counterargument: Counterargument {
                missing_or_weak: "The essay acknowledges 'good effects' but doesn't engage with a serious counterargument, such as the view that the period's hardships were necessary for modern prosperity.".into(),
                stronger_counterclaims: strs(&[
                    "Some historians argue that pre-industrial life was not idyllic and that factory work, despite its flaws, offered a form of economic freedom.",
                ]),
                rebuttals: strs(&[
                    "Acknowledge this point, but pivot back by arguing that this 'freedom' came at the unacceptable cost of human dignity and safety, which spurred necessary reforms.",
                ]),
            },
            rubric_alignment: RubricAlignment {
                likely_pitfalls: strs(&[
                    "If the rubric requires 'synthesis of evidence,' this essay would score poorly as it only lists general effects.",
                    "Lacks the 'complexity' often required for top marks.",
                ]),
                targeted_moves_to_score_max: strs(&[
                    "Integrate one specific case study (e.g., the Lowell Mill Girls).",
                    "Use the exemplar thesis rewrite to show a clear, complex argument from the start.",
                ]),
            },
        },
        meso_feedback: vec![MesoFeedback {
            paragraph_index: 1,
            topic_sentence_check: TopicSentenceCheck {
                status: TopicSentenceStatus::Clear,
                rewrite: "The Industrial Revolution's primary economic outcome was a paradox: it created unprecedented national wealth while simultaneously entrenching exploitative labor conditions for the working class.".into(),
            },
            logic_flow: LogicFlow {
                issues: strs(&[
                    "Jumps from 'cheaper goods' to 'poor working conditions' without a clear logical bridge.",
                ]),
                bridges: strs(&["Add a transition: 'However, this mass production came at a human cost.'"]),
            },
            evidence_binding: EvidenceBinding {
                quotes_or_data_needed: strs(&[
                    "Specifics on wage decreases or accident rates in factories.",
                ]),
                analysis_depth_tip: "Instead of just stating conditions were bad, explain why they were bad from a systemic perspective (e.g., lack of regulation, power imbalance).".into(),
            },
            cohesion_score: 6,
        }],
        micro_feedback: vec![
            MicroFeedback {
                sentence_index: 1,
                original: "It changed society in many ways.".into(),
                issues: vec![MicroIssue::Wordiness],
                rewrite_stronger: "It fundamentally reshaped societal structures.".into(),
                why_rewrite_is_better: "More concise and uses stronger, more academic vocabulary.".into(),
            },
            MicroFeedback {
                sentence_index: 2,
                original: "For many people, life became very different.".into(),
                issues: vec![MicroIssue::AmbiguousPronoun],
                rewrite_stronger: "This transformation was particularly acute for the burgeoning urban populace.".into(),
                why_rewrite_is_better: "Specifies who was affected and uses more precise language.".into(),
            },
            MicroFeedback {
                sentence_index: 6,
                original: "This is something that is often criticized.".into(),
                issues: vec![MicroIssue::PassiveVoice, MicroIssue::Wordiness],
                rewrite_stronger: "Historians frequently criticize these labor practices.".into(),
                why_rewrite_is_better: "Uses active voice and identifies the critics, adding authority.".into(),
            },
            MicroFeedback {
                sentence_index: 11,
                original: "It definitely was a very important time.".into(),
                issues: vec![MicroIssue::ToneMismatch, MicroIssue::Wordiness],
                rewrite_stronger: "Ultimately, the era's importance lies in its complex and enduring legacy.".into(),
                why_rewrite_is_better: "More formal tone and specifies why it's important.".into(),
            },
        ],
        style_tuning: StyleTuning {
            target_style: "Concise Academic".into(),
            diction_suggestions: strs(&[
                "Replace 'good/bad' with 'beneficial/detrimental'.",
                "Replace 'changed' with 'transformed', 'altered', 'restructured'.",
            ]),
            syntax_variation_tips: strs(&[
                "Combine short sentences. 'Factories were built, and cities grew' could become 'The construction of factories fueled rapid urban expansion.'",
            ]),
            tone_consistency_notes: strs(&[
                "Avoid conversational phrases like 'definitely' or 'very important.'",
            ]),
            cadence_examples: strs(&[
                "'While one faction championed the advances, another decried the human cost.'",
            ]),
        },
        citation_review: CitationReview {
            declared_style: CitationStyle::Unknown,
            formatting_issues: strs(&["No citations are present."]),
            missing_attributions: strs(&[
                "All claims about historical events are currently unsupported.",
            ]),
            works_cited_gaps: strs(&["A works cited or bibliography page is required."]),
            examples_correct_format: strs(&[
                "In-text (MLA): (Hobsbawm 112).",
                "Works Cited (MLA): Hobsbawm, Eric. The Age of Revolution: 1789-1848. Vintage, 1996.",
            ]),
        },
        originality_and_claims: OriginalityAndClaims {
            unsupported_claims: strs(&[
                "'People worked long hours in dangerous factories.' - needs a source.",
                "'New urban communities...lacked sanitation.' - needs evidence.",
            ]),
            checkable_facts: strs(&[
                "The entire essay consists of general claims that need to be substantiated with checkable facts (dates, statistics, specific events).",
            ]),
            speculative_language_to_hedge: strs(&[
                "Not applicable, as the essay states claims as facts rather than speculating.",
            ]),
            originality_risk_rationale: "Low risk. The content is a standard, high-level summary of the topic. The risk would increase if specific, un-cited passages from other sources were used.".into(),
        },
        prioritized_action_plan: vec![
            ActionPlanItem {
                priority: Priority::P0,
                title: "Fortify Your Thesis".into(),
                why: "Your thesis is the foundation of your entire essay. A weak foundation means the entire argument is unstable.".into(),
                how: strs(&[
                    "Use the exemplar rewrite as a starting point.",
                    "Make sure your thesis makes a specific, debatable claim.",
                ]),
            },
            ActionPlanItem {
                priority: Priority::P1,
                title: "Inject Concrete Evidence".into(),
                why: "Without evidence, your arguments are just opinions. You need facts, examples, and data to be persuasive.".into(),
                how: strs(&[
                    "For each body paragraph, find one specific statistic, quote, or historical example.",
                    "Add citations for all evidence.",
                ]),
            },
            ActionPlanItem {
                priority: Priority::P2,
                title: "Refine Sentence-Level Prose".into(),
                why: "Clear, concise language makes your arguments more powerful and easier for the reader to follow.".into(),
                how: strs(&[
                    "Address the specific sentence-level rewrites.",
                    "Eliminate vague words like 'many ways', 'something', and 'very'.",
                ]),
            },
        ],
        one_pass_polish: OnePassPolish {
            global_rewrite_suggestions: strs(&[
                "Perform a 'search and replace' for weak verbs like 'was' and 'had' to find opportunities for more active language.",
            ]),
            transitions_pack: strs(&[
                "'Consequently,'",
                "'Furthermore,'",
                "'In contrast,'",
                "'This shift illustrates...'",
            ]),
            thesis_plus_map_rewrite: "While the Industrial Revolution spurred economic growth through technological innovation, its true legacy is defined by the profound and often detrimental social restructuring it forced upon urban working-class communities, a process evident in the degradation of labor, the erosion of public health, and the fracturing of traditional community structures.".into(),
            elevated_conclusion_rewrite: "In retrospect, the Industrial Revolution was less a monolithic event than a complex series of trade-offs. While it laid the groundwork for modern economies, it also surfaced deep-seated conflicts between capital and labor, progress and well-being, that continue to shape contemporary debates. Therefore, its legacy is not merely historical, but a living blueprint of the societal challenges inherent to large-scale technological disruption.".into(),
        },
        ultra_extras: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_serializes_and_normalizes() {
        let raw = serde_json::to_value(sample_response()).unwrap();
        let back = crate::schema::normalize(raw, false).unwrap();
        assert_eq!(back, sample_response());
    }

    #[test]
    fn test_sample_essays_present() {
        assert_eq!(SAMPLE_ESSAYS.len(), 3);
        for essay in SAMPLE_ESSAYS {
            assert!(!essay.title.is_empty());
            assert!(!essay.text.trim().is_empty());
        }
    }

    #[test]
    fn test_sample_action_plan_spans_all_tiers() {
        let plan = sample_response().prioritized_action_plan;
        let tiers: Vec<Priority> = plan.iter().map(|i| i.priority).collect();
        assert_eq!(tiers, vec![Priority::P0, Priority::P1, Priority::P2]);
    }
}
