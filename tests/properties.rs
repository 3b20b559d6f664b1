// Property tests for the blur engines and row partitioning.

use parallel_blur::blur::{partition_rows, sequential_blur, ParallelBlurEngine, RayonBlurEngine};
use parallel_blur::generate::{seeded_buffer, uniform_buffer};
use parallel_blur::{Color, PixelBuffer};
use proptest::prelude::*;

fn arb_color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::new(r, g, b))
}

fn arb_buffer() -> impl Strategy<Value = PixelBuffer> {
    (3usize..40, 3usize..40).prop_flat_map(|(width, height)| {
        prop::collection::vec(arb_color(), width * height)
            .prop_map(move |pixels| PixelBuffer::from_vec(width, height, pixels).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parallel_matches_sequential(input in arb_buffer()) {
        let expected = sequential_blur(&input);
        for workers in [1, 2, 4, 8] {
            let output = ParallelBlurEngine::new(workers).blur(&input).unwrap();
            prop_assert_eq!(&output, &expected, "workers = {}", workers);
        }
        prop_assert_eq!(&RayonBlurEngine::new().blur(&input).unwrap(), &expected);
    }

    #[test]
    fn border_pixels_unchanged(input in arb_buffer(), workers in 1usize..10) {
        let output = ParallelBlurEngine::new(workers).blur(&input).unwrap();
        let sequential = sequential_blur(&input);
        for y in 0..input.height() {
            for x in 0..input.width() {
                if input.is_border(x, y) {
                    prop_assert_eq!(output.get(x, y), input.get(x, y));
                    prop_assert_eq!(sequential.get(x, y), input.get(x, y));
                }
            }
        }
    }

    #[test]
    fn uniform_input_is_fixed_point(
        color in arb_color(),
        width in 3usize..30,
        height in 3usize..30,
        workers in 1usize..10,
    ) {
        let input = uniform_buffer(width, height, color).unwrap();
        prop_assert_eq!(&sequential_blur(&input), &input);
        prop_assert_eq!(&ParallelBlurEngine::new(workers).blur(&input).unwrap(), &input);
        prop_assert_eq!(&RayonBlurEngine::new().blur(&input).unwrap(), &input);
    }

    #[test]
    fn partitions_cover_interior_exactly(height in 3usize..5000, workers in 1usize..64) {
        let parts = partition_rows(height, workers).unwrap();

        prop_assert!(parts.len() <= workers);
        prop_assert_eq!(parts[0].start_row, 1);
        prop_assert_eq!(parts[parts.len() - 1].end_row, height - 1);

        let mut hits = vec![0u8; height];
        for part in &parts {
            prop_assert!(!part.is_empty());
            for y in part.rows() {
                hits[y] += 1;
            }
        }
        prop_assert_eq!(hits[0], 0);
        prop_assert_eq!(hits[height - 1], 0);
        prop_assert!(hits[1..height - 1].iter().all(|&h| h == 1));
    }
}

#[test]
fn reference_size_matches_sequential() {
    let input = seeded_buffer(1920, 1080, 2024).unwrap();
    let expected = sequential_blur(&input);
    for workers in [1, 2, 4, 8] {
        assert_eq!(ParallelBlurEngine::new(workers).blur(&input).unwrap(), expected);
    }
}

#[test]
fn zero_5x5_stays_zero() {
    let input = PixelBuffer::filled(5, 5, Color::BLACK).unwrap();
    assert_eq!(sequential_blur(&input), input);
    for workers in [1, 2, 4, 8] {
        assert_eq!(ParallelBlurEngine::new(workers).blur(&input).unwrap(), input);
    }
}
