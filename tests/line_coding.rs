use linecode8b10b::comma::{find_comma, find_spurious_comma};
use linecode8b10b::constants::CONTROL_CODES;
use linecode8b10b::{
    Character, Decoded, Decoder, Encoder, LineCodec, LineCodecBuilder, RunningDisparity, Symbol,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const K28: [u16; 8] = [
    0b0011110100, // K28.0
    0b0011111001, // K28.1
    0b0011110101, // K28.2
    0b0011110011, // K28.3
    0b0011110010, // K28.4
    0b0011111010, // K28.5
    0b0011110110, // K28.6
    0b0011111000, // K28.7
];

/// Two of each K28.y followed by 10,000 seeded random data bytes
fn scenario_input() -> Vec<Character> {
    let mut input = Vec::new();
    for y in 0..8u8 {
        let k = Character::control((y << 5) | 28).unwrap();
        input.extend([k, k]);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    input.extend((0..10_000).map(|_| Character::data(rng.gen::<u8>())));
    input
}

/// Clock the characters through an encoder, cycle by cycle
fn encode(characters: &[Character]) -> Vec<Symbol> {
    let mut encoder = Encoder::new();
    let mut output: Vec<Symbol> = characters.iter().filter_map(|&c| encoder.clock(c)).collect();
    output.extend(encoder.drain());
    output
}

#[test]
fn test_running_disparity_stays_at_one() {
    let output = encode(&scenario_input());
    let mut rd = -1;
    for symbol in &output {
        rd += symbol.disparity();
        assert!(rd == -1 || rd == 1, "running disparity {} after {}", rd, symbol);
    }
}

#[test]
fn test_comma_identity() {
    let output = encode(&scenario_input());
    for (i, &c) in K28.iter().enumerate() {
        let ok = [c, !c & 0x3FF];
        assert!(ok.contains(&output[2 * i].value()), "K28.{}", i);
        assert!(ok.contains(&output[2 * i + 1].value()), "K28.{}", i);
    }
}

#[test]
fn test_no_spurious_commas() {
    let output = encode(&scenario_input());
    let data = &output[16..];
    assert_eq!(find_spurious_comma(data), None);
    assert_eq!(find_comma(data), None);
    assert!(data.iter().all(|s| !s.is_comma()));
}

#[test]
fn test_commas_are_found_where_sent() {
    let output = encode(&scenario_input());
    // K28.1 is the first comma character sent
    let hit = find_comma(&output).unwrap();
    assert_eq!((hit.index, hit.shift), (2, 0));
}

#[test]
fn test_roundtrip() {
    let input = scenario_input();
    let output = encode(&input);
    assert_eq!(output.len(), input.len());

    let mut decoder = Decoder::new();
    let mut decoded: Vec<Decoded> = output.iter().filter_map(|&s| decoder.clock(s)).collect();
    decoded.extend(decoder.drain());

    let characters: Vec<Character> = decoded.iter().filter_map(Decoded::character).collect();
    assert_eq!(characters, input);
    assert_eq!(decoder.stats().error_count(), 0);
    assert_eq!(decoder.stats().symbols, input.len() as u64);
}

#[test]
fn test_reset_is_idempotent() {
    let input = scenario_input();
    let mut codec = LineCodec::default();
    let first = codec.encode_sequence(&input);
    codec.reset();
    let second = codec.encode_sequence(&input);
    assert_eq!(first, second);
}

#[test]
fn test_every_character_roundtrips_from_both_disparities() {
    let characters: Vec<Character> = (0..=255u8)
        .map(Character::data)
        .chain(CONTROL_CODES.iter().map(|&v| Character::control(v).unwrap()))
        .collect();
    for initial in [RunningDisparity::Negative, RunningDisparity::Positive] {
        for &character in &characters {
            let mut encoder = Encoder::with_initial_disparity(initial);
            let mut decoder = Decoder::with_initial_disparity(initial);
            let decoded = decoder.decode(encoder.encode(character));
            assert_eq!(decoded, Decoded::Valid(character));
        }
    }
}

#[test]
fn test_corrupted_symbol_is_flagged_and_decoding_continues() {
    let input: Vec<Character> = (0..64u8).map(Character::data).collect();
    let mut codec = LineCodec::default();
    let mut symbols = codec.encode_sequence(&input);
    symbols[10] = Symbol::new(0b0000000000).unwrap();

    let decoded = codec.decode_sequence(&symbols);
    assert_eq!(decoded.len(), input.len());
    assert_eq!(decoded[10], Decoded::Invalid(symbols[10]));
    assert_eq!(decoded[0..10].iter().filter(|d| d.is_valid()).count(), 10);
    assert!(codec.stats().invalid_codewords >= 1);
    assert!(codec.decode_sequence_strict(&symbols).is_err());
}

fn character() -> impl Strategy<Value = Character> {
    prop_oneof![
        4 => any::<u8>().prop_map(Character::data),
        1 => prop::sample::select(CONTROL_CODES.to_vec())
            .prop_map(|v| Character::control(v).unwrap()),
    ]
}

fn disparity() -> impl Strategy<Value = RunningDisparity> {
    prop_oneof![Just(RunningDisparity::Negative), Just(RunningDisparity::Positive)]
}

proptest! {
    #[test]
    fn prop_roundtrip(initial in disparity(), input in prop::collection::vec(character(), 0..256)) {
        let mut codec = LineCodecBuilder::new().with_initial_disparity(initial).build();
        let symbols = codec.encode_sequence(&input);
        let decoded = codec.decode_sequence_strict(&symbols).unwrap();
        prop_assert_eq!(decoded, input);
        prop_assert_eq!(codec.encoder_disparity(), codec.decoder_disparity());
    }

    #[test]
    fn prop_data_stream_has_no_spurious_commas(data in prop::collection::vec(any::<u8>(), 2..256)) {
        let mut codec = LineCodec::default();
        let symbols = codec.encode_bytes(&data);
        prop_assert_eq!(find_comma(&symbols), None);
    }

    #[test]
    fn prop_decoder_survives_arbitrary_symbols(raw in prop::collection::vec(0u16..1024, 0..128)) {
        let mut decoder = Decoder::new();
        for value in raw {
            decoder.decode(Symbol::new(value).unwrap());
            let rd = decoder.disparity().as_i8();
            prop_assert!(rd == -1 || rd == 1);
        }
    }
}
