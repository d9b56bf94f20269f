use polycube_bound::interval::{Interval, Split};
use polycube_bound::polycube::Polycube;
use proptest::prelude::*;

fn interval() -> impl Strategy<Value = Interval> {
    (-1.0e3f64..1.0e3, 0.0f64..1.0e3).prop_map(|(lo, width)| Interval::new(lo, lo + width).unwrap())
}

fn sample(i: Interval, t: f64) -> f64 {
    (i.left() + t * i.size()).clamp(i.left(), i.right())
}

proptest! {
    #[test]
    fn add_contains_pointwise_sum(a in interval(), b in interval(), s in 0.0f64..=1.0, t in 0.0f64..=1.0) {
        let (x, y) = (sample(a, s), sample(b, t));
        prop_assert!(a.add(b).contains(x + y));
        prop_assert!(a.sub(b).contains(x - y));
    }

    #[test]
    fn mul_contains_pointwise_product(a in interval(), b in interval(), s in 0.0f64..=1.0, t in 0.0f64..=1.0) {
        let (x, y) = (sample(a, s), sample(b, t));
        prop_assert!(a.mul(b).contains(x * y));
    }

    #[test]
    fn square_contains_pointwise_square(a in interval(), s in 0.0f64..=1.0) {
        let x = sample(a, s);
        let sq = a.square();
        prop_assert!(sq.contains(x * x));
        prop_assert!(sq.left() >= 0.0);
    }

    #[test]
    fn square_never_wider_than_mul(a in interval()) {
        let sq = a.square();
        let m = a * a;
        prop_assert!(sq.left() >= m.left());
        prop_assert!(sq.right() <= m.right());
    }

    #[test]
    fn split_is_exact(a in interval()) {
        prop_assume!(a.size() > 0.0);
        match a.split() {
            Split::Halves(l, r) => {
                prop_assert_eq!(l.left(), a.left());
                prop_assert_eq!(r.right(), a.right());
                prop_assert_eq!(l.right(), r.left());
                let tolerance = a.size() * 1e-12 + f64::EPSILON * a.left().abs().max(a.right().abs());
                prop_assert!((l.size() - r.size()).abs() <= tolerance);
            }
            Split::Whole(_) => prop_assert!(false, "positive width must split"),
        }
    }

    #[test]
    fn split_of_point_is_itself(v in -1.0e6f64..1.0e6) {
        let p = Interval::point(v);
        prop_assert_eq!(p.split().to_vec(), vec![p]);
    }

    #[test]
    fn child_volumes_sum_to_parent(
        widths in prop::collection::vec(1usize..8, 3),
        dims in prop::sample::subsequence(vec![3usize, 4, 5], 1..=3),
    ) {
        let mut z = vec![Interval::point(2.0); 3];
        z.extend(widths.iter().map(|&w| Interval::new(0.0, w as f64).unwrap()));
        let cube = Polycube::new(z).unwrap();

        let children = cube.split(&dims).unwrap();
        prop_assert_eq!(children.len(), 1usize << dims.len());
        let total: f64 = children.iter().map(Polycube::volume).sum();
        prop_assert_eq!(total, cube.volume());

        for child in cube.split(&dims[..1]).unwrap() {
            prop_assert_eq!(child.volume(), cube.volume() / 2.0);
        }
    }
}
