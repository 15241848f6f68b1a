mod test_signals;

use pdm192::Decimator192;
use pdm192::constants::{HISTORY_SEED, HISTORY_WORDS, OUTPUT_GAIN_SHIFT, PHASE_OFFSET};
use pdm192::decimator::bit_fir::fir_1x16_bit;
use pdm192::decimator::{PHASE_A, PHASE_B};

use test_signals::{DC_ALL_ZERO, decimate_words, random_words};

#[test]
fn test_all_zero_input_settles_to_dc_response() {
    let samples = decimate_words(&[0; 12]);

    // Once the seed has left the window both phases read the DC response
    let expected = -((PHASE_A.tap_sum() / 2) as i32) << OUTPUT_GAIN_SHIFT;
    assert_eq!(expected, DC_ALL_ZERO);
    for pair in samples[2 * (HISTORY_WORDS - 1)..].chunks_exact(2) {
        assert_eq!(pair, [DC_ALL_ZERO, DC_ALL_ZERO]);
    }
    // ...but not before
    assert_ne!(samples[2 * (HISTORY_WORDS - 2)], DC_ALL_ZERO);
}

#[test]
fn test_all_one_input_mirrors_all_zero() {
    let samples = decimate_words(&[u32::MAX; 10]);
    assert_eq!(samples[18..], [-DC_ALL_ZERO, -DC_ALL_ZERO]);
}

#[test]
fn test_seed_input_is_silent() {
    let samples = decimate_words(&[HISTORY_SEED; 16]);
    assert!(samples.iter().all(|&s| s == 0));
}

#[test]
fn test_identical_instances_are_deterministic() {
    let words = random_words(1, 500);
    assert_eq!(decimate_words(&words), decimate_words(&words));
}

#[test]
fn test_output_is_raw_convolution_shifted() {
    let words = random_words(2, 40);
    let samples = decimate_words(&words);

    for (i, pair) in samples.chunks_exact(2).enumerate().skip(HISTORY_WORDS) {
        // Newest word first
        let window: [u32; HISTORY_WORDS] = core::array::from_fn(|w| words[i - w]);
        assert_eq!(pair[0], fir_1x16_bit(&window, &PHASE_A) << OUTPUT_GAIN_SHIFT);
        assert_eq!(pair[1], fir_1x16_bit(&window, &PHASE_B) << OUTPUT_GAIN_SHIFT);
        assert_eq!(pair[0] % 8, 0);
    }
}

#[test]
fn test_output_depends_only_on_last_eight_blocks() {
    let tail = random_words(3, HISTORY_WORDS);
    let mut a = random_words(4, 37);
    let mut b = random_words(5, 11);
    a.extend_from_slice(&tail);
    b.extend_from_slice(&tail);

    let out_a = decimate_words(&a);
    let out_b = decimate_words(&b);
    assert_eq!(out_a[out_a.len() - 2..], out_b[out_b.len() - 2..]);
    // The block before the shared tail still sees different history
    assert_ne!(
        out_a[out_a.len() - 4..out_a.len() - 2],
        out_b[out_b.len() - 4..out_b.len() - 2]
    );
}

#[test]
fn test_phases_use_different_filters() {
    let samples = decimate_words(&random_words(6, 64));
    let differing = samples
        .chunks_exact(2)
        .filter(|pair| pair[0] != pair[1])
        .count();
    assert!(differing > 60, "only {} of 64 pairs differ", differing);
}

#[test]
fn test_impulse_walks_taps_sixteen_apart() {
    // Settle on all-zero input, then one set sample followed by zeros
    // High enough that the last output still lands inside the table
    let bit = 21;
    let mut words = vec![0u32; HISTORY_WORDS];
    words.push(1 << bit);
    words.extend(std::iter::repeat_n(0, HISTORY_WORDS - 1));

    let samples = decimate_words(&words);
    let response: Vec<i32> = samples[2 * HISTORY_WORDS..]
        .iter()
        .map(|&s| (s - DC_ALL_ZERO) >> OUTPUT_GAIN_SHIFT)
        .collect();

    // Output k after the impulse sees it at tap (224 + bit) - 16 k of phase A
    let taps = PHASE_A.taps();
    for (k, &value) in response.iter().enumerate() {
        let expected = taps[224 + bit - PHASE_OFFSET * k];
        assert_eq!(value, expected, "output {}", k);
    }
}

#[test]
fn test_channels_match_single_channel_runs() {
    let ch0 = random_words(7, 50);
    let ch1 = random_words(8, 50);

    let mut decimator = Decimator192::<2>::new().init();
    let mut out = [[0; 2]; 2];
    let mut joint = [Vec::new(), Vec::new()];
    for (&a, &b) in ch0.iter().zip(&ch1) {
        decimator.process_block(&mut out, &[a, b]);
        for (mic, samples) in joint.iter_mut().enumerate() {
            samples.push(out[0][mic]);
            samples.push(out[1][mic]);
        }
    }

    assert_eq!(joint[0], decimate_words(&ch0));
    assert_eq!(joint[1], decimate_words(&ch1));
}
