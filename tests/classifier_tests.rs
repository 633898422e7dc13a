// Tests for the ordered keyword classifier
//
// Classification is first-match-wins over a fixed rule order; most tests
// craft utterances matching two rules and check the earlier one wins.

use kitchen_assistant::intent::{classify, Classifier, Intent, IntentLabel, CLOSING_PHRASES};

fn label(text: &str) -> IntentLabel {
    classify(text).label()
}

#[test]
fn test_every_closing_phrase_is_closing() {
    for phrase in CLOSING_PHRASES {
        assert_eq!(label(phrase), IntentLabel::Closing, "phrase: {}", phrase);
    }
}

#[test]
fn test_closing_beats_every_other_rule() {
    let utterances = [
        "thank you, can you suggest a recipe",
        "add items to my pantry, no thank you",
        "add 3 apples then i'm done",
        "cancel the weather",
        "stop and play a song",
        "what's available in my pantry? goodbye",
        "nothing else, tell me a joke",
    ];

    for text in utterances {
        assert_eq!(label(text), IntentLabel::Closing, "utterance: {}", text);
    }
}

#[test]
fn test_recipe_beats_add() {
    assert_eq!(label("suggest a recipe and add it to my items"), IntentLabel::SuggestRecipe);
}

#[test]
fn test_add_items_prompt_beats_add_item() {
    assert_eq!(label("add some items"), IntentLabel::AddItemsPrompt);
    assert_eq!(label("i want to add to my pantry"), IntentLabel::AddItemsPrompt);
    assert_eq!(label("add to the grocery list"), IntentLabel::AddItemsPrompt);
}

#[test]
fn test_add_item_carries_text() {
    assert_eq!(
        classify("add 3 apples"),
        Intent::AddItem {
            text: "add 3 apples".to_string()
        }
    );
}

#[test]
fn test_add_item_beats_weather() {
    assert_eq!(label("add an umbrella for this weather"), IntentLabel::AddItem);
}

#[test]
fn test_weather_beats_song() {
    assert_eq!(label("play a song about the weather"), IntentLabel::CheckWeather);
}

#[test]
fn test_song_beats_list_items() {
    assert_eq!(
        classify("play a song from the available list"),
        Intent::PlaySong {
            song: "from the available list".to_string()
        }
    );
}

#[test]
fn test_list_items_needs_available_and_a_list_word() {
    assert_eq!(label("what's available in my pantry"), IntentLabel::ListItems);
    assert_eq!(label("what is available on the grocery run"), IntentLabel::ListItems);
    assert_eq!(label("read me the available list"), IntentLabel::ListItems);
    assert_eq!(label("is the chef available"), IntentLabel::General);
}

#[test]
fn test_substring_matching_has_no_tokenization() {
    // "address" contains "add"
    assert_eq!(label("what is my address"), IntentLabel::AddItem);
    // "stopwatch" contains "stop"
    assert_eq!(label("start a stopwatch"), IntentLabel::Closing);
}

#[test]
fn test_bare_cancel_words_never_add() {
    for word in ["no", " no "] {
        assert_eq!(
            classify(word),
            Intent::General {
                text: word.to_string()
            }
        );
    }
}

#[test]
fn test_fallback_is_general_with_raw_text() {
    assert_eq!(
        classify("how long do i boil an egg"),
        Intent::General {
            text: "how long do i boil an egg".to_string()
        }
    );
    assert_eq!(label(""), IntentLabel::General);
}

#[test]
fn test_what_s_the_weather() {
    assert_eq!(classify("what's the weather"), Intent::CheckWeather);
}

#[test]
fn test_custom_rule_order_is_respected() {
    use kitchen_assistant::intent::Rule;

    let classifier = Classifier::new(vec![
        Rule {
            label: IntentLabel::CheckWeather,
            matches: |t| t.contains("weather"),
        },
        Rule {
            label: IntentLabel::Closing,
            matches: kitchen_assistant::intent::is_closing,
        },
    ]);

    assert_eq!(classifier.classify("weather, thank you").label(), IntentLabel::CheckWeather);
    assert_eq!(classifier.classify("thank you").label(), IntentLabel::Closing);
    assert_eq!(classifier.classify("add 3 apples").label(), IntentLabel::General);
}
